use crate::core::validator::validate_row;
use crate::domain::model::{ReservationRecord, Schema};
use crate::domain::ports::{ReservationSource, Storage};
use crate::utils::error::{ReservationError, Result};
use crate::utils::text::capitalize_words;
use crate::utils::validation::{validate_file_name, validate_range};
use std::path::PathBuf;

pub const MAX_CAPTURE: usize = 100;

/// 單一訂位檔的建立、標題與新增資料
pub struct ReservationLedger<S: Storage> {
    storage: S,
    file_name: String,
    schema: Schema,
}

impl<S: Storage> ReservationLedger<S> {
    pub fn new(storage: S, file_name: impl Into<String>, schema: Schema) -> Self {
        Self {
            storage,
            file_name: file_name.into(),
            schema,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// 檔案不存在才建立，已存在則沿用
    pub fn create(&self) -> Result<PathBuf> {
        validate_file_name("file_name", &self.file_name)?;

        if !self.storage.exists(&self.file_name) {
            self.storage.write_file(&self.file_name, b"")?;
            tracing::info!("Created {}", self.storage.resolve(&self.file_name).display());
        }

        Ok(self.storage.resolve(&self.file_name))
    }

    /// 只在空檔時寫入標題，回傳是否有寫入
    pub fn write_headers(&self) -> Result<bool> {
        if self.storage.exists(&self.file_name)
            && !self.storage.read_file(&self.file_name)?.is_empty()
        {
            return Ok(false);
        }

        let header = format!("{}\n", self.schema.header_line());
        self.storage.append_file(&self.file_name, header.as_bytes())?;
        Ok(true)
    }

    pub fn append(&self, record: &ReservationRecord) -> Result<()> {
        if record.destination.is_some() != self.schema.has_destination {
            return Err(ReservationError::RowWidthMismatch {
                row: 1,
                expected: self.schema.width(),
                found: record.fields().len(),
            });
        }

        validate_row(&record.fields())?;

        let line = format!("{}\n", record.to_line());
        self.storage.append_file(&self.file_name, line.as_bytes())?;
        tracing::debug!("Appended '{}' to {}", record.to_line(), self.file_name);
        Ok(())
    }

    /// 從資料來源讀取最多 `count` 筆並寫入，來源提前結束時停止
    pub fn capture<R: ReservationSource + ?Sized>(
        &self,
        source: &mut R,
        count: usize,
    ) -> Result<usize> {
        validate_range("count", count, 1, MAX_CAPTURE)?;

        let mut written = 0;
        while written < count {
            let Some(mut record) = source.next_reservation()? else {
                tracing::info!("Reservation source exhausted after {} records", written);
                break;
            };

            record.passenger_name = capitalize_words(&record.passenger_name);
            self.append(&record)?;
            written += 1;
        }

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStorage;
    use crate::domain::model::ReservationClass;
    use std::collections::VecDeque;

    const FILE: &str = "reservas_maestro.txt";

    struct QueueSource(VecDeque<ReservationRecord>);

    impl ReservationSource for QueueSource {
        fn next_reservation(&mut self) -> Result<Option<ReservationRecord>> {
            Ok(self.0.pop_front())
        }
    }

    fn record(seat: &str, name: &str, destination: Option<&str>) -> ReservationRecord {
        ReservationRecord {
            seat_number: seat.to_string(),
            passenger_name: name.to_string(),
            class: ReservationClass::Business,
            destination: destination.map(str::to_string),
        }
    }

    #[test]
    fn test_create_and_headers_are_idempotent() {
        let storage = MemoryStorage::new();
        let ledger = ReservationLedger::new(storage.clone(), FILE, Schema::WITH_DESTINATION);

        ledger.create().unwrap();
        assert!(ledger.write_headers().unwrap());
        ledger.create().unwrap();
        assert!(!ledger.write_headers().unwrap());

        assert_eq!(
            storage.get_file(FILE).unwrap(),
            "SEAT_NUMBER, PASSENGER_NAME, CLASS, DESTINATION\n"
        );
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let ledger = ReservationLedger::new(MemoryStorage::new(), " ", Schema::WITH_DESTINATION);
        assert!(ledger.create().is_err());
    }

    #[test]
    fn test_capture_capitalizes_and_stops_when_source_ends() {
        let storage = MemoryStorage::new();
        let ledger = ReservationLedger::new(storage.clone(), FILE, Schema::WITH_DESTINATION);
        let mut source = QueueSource(VecDeque::from(vec![
            record("12A", "juan PÉREZ", Some("MADRID")),
            record("4F", "ana", Some("LIMA")),
        ]));

        let written = ledger.capture(&mut source, 5).unwrap();

        assert_eq!(written, 2);
        assert_eq!(
            storage.get_file(FILE).unwrap(),
            "12A, Juan Pérez, BUSINESS, MADRID\n4F, Ana, BUSINESS, LIMA\n"
        );
    }

    #[test]
    fn test_capture_count_is_bounded() {
        let ledger = ReservationLedger::new(MemoryStorage::new(), FILE, Schema::WITH_DESTINATION);
        let mut source = QueueSource(VecDeque::new());

        assert!(ledger.capture(&mut source, 0).is_err());
        assert!(ledger.capture(&mut source, MAX_CAPTURE + 1).is_err());
    }

    #[test]
    fn test_append_rejects_invalid_record() {
        let storage = MemoryStorage::new();
        let ledger = ReservationLedger::new(storage.clone(), FILE, Schema::WITH_DESTINATION);

        assert!(ledger.append(&record("12Z", "Ana", Some("LIMA"))).is_err());
        assert!(matches!(
            ledger.append(&record("12A", "Ana", None)),
            Err(ReservationError::RowWidthMismatch { expected: 4, found: 3, .. })
        ));
        assert!(!storage.exists(FILE));
    }
}
