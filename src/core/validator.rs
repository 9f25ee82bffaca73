use crate::domain::model::{FieldKind, RawRow};
use crate::utils::error::{ReservationError, Result};
use regex::Regex;
use std::sync::LazyLock;

static SEAT_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,3}[A-F]$").expect("seat number pattern"));

static PASSENGER_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-zÁÉÍÓÚÑáéíóúñ ]+$").expect("passenger name pattern"));

const CLASSES: [&str; 3] = ["ECONOMY", "BUSINESS", "FIRST"];

const MIN_DESTINATION_CHARS: usize = 3;

/// 依欄位種類驗證單一欄位，值會先修剪空白
pub fn validate_field(value: &str, kind: FieldKind) -> Result<()> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ReservationError::MissingField {
            field: kind.name().to_string(),
        });
    }

    let reason = match kind {
        FieldKind::SeatNumber if !SEAT_NUMBER_RE.is_match(value) => {
            Some("seat number must be 1 to 3 digits followed by a letter A-F (e.g. 12C)")
        }
        FieldKind::PassengerName if !PASSENGER_NAME_RE.is_match(value) => {
            Some("passenger name may only contain letters and spaces")
        }
        FieldKind::Class if !CLASSES.contains(&value) => {
            Some("class must be ECONOMY, BUSINESS or FIRST")
        }
        FieldKind::Destination if value.chars().count() < MIN_DESTINATION_CHARS => {
            Some("destination must be at least 3 characters long")
        }
        _ => None,
    };

    match reason {
        Some(reason) => Err(ReservationError::FieldFormatInvalid {
            field: kind.name().to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// 依位置逐欄驗證一列，遇到第一個錯誤即停止
pub fn validate_row(fields: &[String]) -> Result<()> {
    for (field, kind) in fields.iter().zip(FieldKind::ALL.iter()) {
        validate_field(field, *kind)?;
    }
    Ok(())
}

/// 全有或全無的批次檢查：先比對欄數，再逐欄驗證，第一個錯誤即讓整批失敗
pub fn validate_records(rows: &[RawRow], expected_width: usize) -> Result<()> {
    if rows.is_empty() {
        return Err(ReservationError::EmptyBatch);
    }

    if expected_width > FieldKind::ALL.len() {
        return Err(ReservationError::InvalidConfigValueError {
            field: "expected_width".to_string(),
            value: expected_width.to_string(),
            reason: format!("at most {} fields are supported", FieldKind::ALL.len()),
        });
    }

    for (index, row) in rows.iter().enumerate() {
        if row.width() != expected_width {
            return Err(ReservationError::RowWidthMismatch {
                row: index + 1,
                expected: expected_width,
                found: row.width(),
            });
        }

        validate_row(&row.fields).map_err(|source| ReservationError::InvalidRecord {
            row: index + 1,
            source: Box::new(source),
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(line: usize, fields: &[&str]) -> RawRow {
        RawRow::new(line, fields.iter().map(|f| f.to_string()).collect())
    }

    #[test]
    fn test_seat_number_rule() {
        assert!(validate_field("12C", FieldKind::SeatNumber).is_ok());
        assert!(validate_field("1F", FieldKind::SeatNumber).is_ok());
        assert!(validate_field(" 123A ", FieldKind::SeatNumber).is_ok());
        assert!(validate_field("1234A", FieldKind::SeatNumber).is_err());
        assert!(validate_field("12", FieldKind::SeatNumber).is_err());
        assert!(validate_field("12c", FieldKind::SeatNumber).is_err());
        assert!(validate_field("12G", FieldKind::SeatNumber).is_err());
        assert!(validate_field("٣A", FieldKind::SeatNumber).is_err());
    }

    #[test]
    fn test_blank_field_is_missing_for_every_kind() {
        for kind in FieldKind::ALL {
            let err = validate_field("   ", kind).unwrap_err();
            match err {
                ReservationError::MissingField { field } => assert_eq!(field, kind.name()),
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_passenger_name_rule() {
        assert!(validate_field("John Smith", FieldKind::PassengerName).is_ok());
        assert!(validate_field("José Núñez", FieldKind::PassengerName).is_ok());
        assert!(validate_field("R2D2", FieldKind::PassengerName).is_err());
        assert!(validate_field("O'Brien", FieldKind::PassengerName).is_err());
    }

    #[test]
    fn test_class_rule_is_case_sensitive() {
        assert!(validate_field("ECONOMY", FieldKind::Class).is_ok());
        assert!(validate_field("BUSINESS", FieldKind::Class).is_ok());
        assert!(validate_field("FIRST", FieldKind::Class).is_ok());
        assert!(validate_field("economy", FieldKind::Class).is_err());
        assert!(validate_field("Economy", FieldKind::Class).is_err());
        assert!(validate_field("PREMIUM", FieldKind::Class).is_err());
    }

    #[test]
    fn test_destination_rule_counts_characters() {
        assert!(validate_field("ROMA", FieldKind::Destination).is_ok());
        assert!(validate_field("Río", FieldKind::Destination).is_ok());
        assert!(validate_field("NY", FieldKind::Destination).is_err());
    }

    #[test]
    fn test_batch_accepts_valid_rows() {
        let rows = vec![
            row(1, &["12A", "John Smith", "ECONOMY", "PARIS"]),
            row(2, &["3F", "Ana Lopez", "FIRST", "TOKIO"]),
        ];
        assert!(validate_records(&rows, 4).is_ok());
    }

    #[test]
    fn test_batch_rejects_width_mismatch() {
        let rows = vec![
            row(1, &["12A", "John Smith", "ECONOMY", "PARIS"]),
            row(2, &["3F", "Ana Lopez", "FIRST"]),
        ];
        match validate_records(&rows, 4) {
            Err(ReservationError::RowWidthMismatch {
                row,
                expected,
                found,
            }) => {
                assert_eq!((row, expected, found), (2, 4, 3));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_batch_short_circuits_on_first_invalid_field() {
        let rows = vec![
            row(1, &["12a", "John 5", "economy", "PARIS"]),
            row(2, &["bad", "bad", "bad", "x"]),
        ];
        let err = validate_records(&rows, 4).unwrap_err();
        let ReservationError::InvalidRecord { row, source } = err else {
            panic!("expected InvalidRecord");
        };
        assert_eq!(row, 1);
        assert!(matches!(
            *source,
            ReservationError::FieldFormatInvalid { ref field, .. } if field == "SEAT_NUMBER"
        ));
    }

    #[test]
    fn test_empty_batch_fails() {
        assert!(matches!(
            validate_records(&[], 3),
            Err(ReservationError::EmptyBatch)
        ));
    }
}
