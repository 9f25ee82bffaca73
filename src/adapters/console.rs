use crate::core::validator::validate_field;
use crate::domain::model::{Destination, FieldKind, ReservationClass, ReservationRecord, Schema};
use crate::domain::ports::ReservationSource;
use crate::utils::error::{ReservationError, Result};
use crate::utils::text::capitalize_words;
use std::io::{BufRead, Write};

pub const MAX_PASSENGER_NAME_LEN: usize = 32;

/// 以文字提示逐欄讀取訂位資料。欄位不合法時重新詢問，輸入結束即停止。
pub struct ConsoleSource<R: BufRead, W: Write> {
    input: R,
    output: W,
    schema: Schema,
}

impl<R: BufRead, W: Write> ConsoleSource<R, W> {
    pub fn new(input: R, output: W, schema: Schema) -> Self {
        Self {
            input,
            output,
            schema,
        }
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)
            .and_then(|_| self.output.flush())
            .map_err(|e| ReservationError::from_io("<console>", e))
    }

    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{}: ", message)
            .and_then(|_| self.output.flush())
            .map_err(|e| ReservationError::from_io("<console>", e))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| ReservationError::from_io("<console>", e))?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn prompt_field(&mut self, message: &str, kind: FieldKind) -> Result<Option<String>> {
        loop {
            let Some(value) = self.prompt(message)? else {
                return Ok(None);
            };
            if kind == FieldKind::PassengerName && value.chars().count() > MAX_PASSENGER_NAME_LEN {
                self.say(&format!(
                    "⚠️ {} must be at most {} characters",
                    kind, MAX_PASSENGER_NAME_LEN
                ))?;
                continue;
            }
            match validate_field(&value, kind) {
                Ok(()) => {
                    self.say(&format!("✅ {}", value))?;
                    return Ok(Some(value));
                }
                Err(e) => self.say(&format!("⚠️ {}", e))?,
            }
        }
    }

    /// 選單選擇：空白取第一項，可輸入編號或名稱
    fn prompt_choice<T, F>(&mut self, message: &str, options: &[T], parse: F) -> Result<Option<T>>
    where
        T: Copy + std::fmt::Display,
        F: Fn(&str) -> Option<T>,
    {
        let menu = options
            .iter()
            .enumerate()
            .map(|(i, option)| format!("  {}) {}", i + 1, option))
            .collect::<Vec<_>>()
            .join("\n");
        self.say(&menu)?;

        loop {
            let Some(value) = self.prompt(message)? else {
                return Ok(None);
            };
            if value.is_empty() {
                return Ok(options.first().copied());
            }

            let chosen = match value.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => Some(options[n - 1]),
                Ok(_) => None,
                Err(_) => parse(&value),
            };
            match chosen {
                Some(option) => return Ok(Some(option)),
                None => self.say(&format!("⚠️ '{}' is not one of the options", value))?,
            }
        }
    }
}

impl<R: BufRead, W: Write> ReservationSource for ConsoleSource<R, W> {
    fn next_reservation(&mut self) -> Result<Option<ReservationRecord>> {
        let Some(seat_number) = self.prompt_field("Seat number", FieldKind::SeatNumber)? else {
            return Ok(None);
        };
        let name_prompt = format!("Passenger name (max {} characters)", MAX_PASSENGER_NAME_LEN);
        let Some(passenger_name) = self.prompt_field(&name_prompt, FieldKind::PassengerName)? else {
            return Ok(None);
        };
        let Some(class) = self.prompt_choice("Class", &ReservationClass::ALL, |s| s.parse().ok())?
        else {
            return Ok(None);
        };

        let destination = if self.schema.has_destination {
            match self.prompt_choice("Destination", Destination::ALL, |s| s.parse().ok())? {
                Some(destination) => Some(destination.name().to_string()),
                None => return Ok(None),
            }
        } else {
            None
        };

        Ok(Some(ReservationRecord {
            seat_number,
            passenger_name: capitalize_words(&passenger_name),
            class,
            destination,
        }))
    }
}
