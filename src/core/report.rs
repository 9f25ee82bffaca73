use crate::core::reader::parse_rows;
use crate::domain::model::{Destination, FieldKind, ProcessSummary, ReservationClass};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use crate::utils::text::slugify;

const RULE: &str = "─────────────────────────────";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub seat_number: String,
    pub passenger_name: String,
    pub class: String,
    pub destination: Option<String>,
}

/// 訂位檔的主控台報表
#[derive(Debug, Clone)]
pub struct ReservationReport {
    pub file_name: String,
    pub entries: Vec<ReportEntry>,
    pub show_destination: bool,
    pub class_filter: Option<ReservationClass>,
}

impl ReservationReport {
    pub fn load<S: Storage>(
        storage: &S,
        file_name: &str,
        show_destination: bool,
        class_filter: Option<ReservationClass>,
    ) -> Result<Self> {
        let data = storage.read_file(file_name)?;
        let mut rows = parse_rows(&data)?;
        if rows.first().is_some_and(|row| row.is_header()) {
            rows.remove(0);
        }

        let entries = rows
            .iter()
            .map(|row| ReportEntry {
                seat_number: row.field(FieldKind::SeatNumber).unwrap_or_default().to_string(),
                passenger_name: row
                    .field(FieldKind::PassengerName)
                    .unwrap_or_default()
                    .to_string(),
                class: row.field(FieldKind::Class).unwrap_or_default().to_string(),
                destination: row
                    .field(FieldKind::Destination)
                    .filter(|d| !d.is_empty())
                    .map(str::to_string),
            })
            .collect();

        Ok(Self {
            file_name: file_name.to_string(),
            entries,
            show_destination,
            class_filter,
        })
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// 不分大小寫計算某艙等人數
    pub fn count_class(&self, class: ReservationClass) -> usize {
        self.entries
            .iter()
            .filter(|e| e.class.eq_ignore_ascii_case(class.name()))
            .count()
    }

    pub fn render(&self) -> String {
        let mut lines = vec![
            "╔══════════════════════════════════════╗".to_string(),
            "║          📖 RESERVATIONS LOG         ║".to_string(),
            "╚══════════════════════════════════════╝".to_string(),
            String::new(),
            format!("➡ Reservations in {}:", self.file_name),
            RULE.to_string(),
        ];

        for (i, entry) in self.entries.iter().enumerate() {
            let mut line = format!(
                "#{} | 🪑 Seat: {:<5} 👤 Passenger: {:<15} 🎟 Class: {:<10}",
                i + 1,
                entry.seat_number,
                entry.passenger_name,
                entry.class
            );
            if self.show_destination {
                line.push_str(&format!(
                    " 🌍 Destination: {}",
                    entry.destination.as_deref().unwrap_or("N/A")
                ));
            }
            lines.push(line);
        }

        lines.push(String::new());
        lines.push("📊 Statistics".to_string());
        lines.push(RULE.to_string());
        lines.push(format!("✔ Total reservations           : {}", self.total()));
        if let Some(class) = self.class_filter {
            lines.push(format!(
                "✔ Passengers in {:<15}: {}",
                class.name().to_lowercase(),
                self.count_class(class)
            ));
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

pub fn destination_file_name(prefix: &str, destination: Destination) -> String {
    format!("{}{}.txt", prefix, slugify(destination.name()))
}

/// 顯示某目的地的分檔；檔案不存在時回傳 `None`
pub fn show_destination<S: Storage>(
    storage: &S,
    prefix: &str,
    destination: Destination,
) -> Result<Option<ReservationReport>> {
    let file_name = destination_file_name(prefix, destination);
    if !storage.exists(&file_name) {
        tracing::warn!("❌ {} does not exist", storage.resolve(&file_name).display());
        return Ok(None);
    }

    ReservationReport::load(storage, &file_name, true, None).map(Some)
}

/// 處理結果摘要：產生的檔案、各檔筆數、合法總數與錯誤紀錄內容
pub fn render_summary(summary: &ProcessSummary) -> String {
    let mut out = format!("📂 Files created: {}\n", summary.files.len());
    for file in &summary.files {
        out.push_str(&format!(
            "   {} ({}): {} reservations\n",
            file.file_name, file.destination, file.count
        ));
    }
    out.push_str(&format!("✔ Valid reservations: {}\n", summary.total_valid));
    out.push_str(&format!("✘ Rejected rows: {}\n", summary.rejected));

    if let Some(log) = &summary.error_log {
        out.push_str("\n⚠️ Error log:\n");
        out.push_str(log);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStorage;
    use crate::domain::model::FileCount;

    const MASTER: &str = "reservas_maestro.txt";

    fn storage() -> MemoryStorage {
        MemoryStorage::new().with_file(
            MASTER,
            "SEAT_NUMBER, PASSENGER_NAME, CLASS, DESTINATION\n\
             12A, John Smith, BUSINESS, PARIS\n\
             3B, Ana Lopez, business, TOKIO\n\
             7C, Eva Ruiz, FIRST\n",
        )
    }

    #[test]
    fn test_report_counts() {
        let report = ReservationReport::load(
            &storage(),
            MASTER,
            true,
            Some(ReservationClass::Business),
        )
        .unwrap();

        assert_eq!(report.total(), 3);
        assert_eq!(report.count_class(ReservationClass::Business), 2);
        assert_eq!(report.entries[2].destination, None);

        let text = report.render();
        assert!(text.contains("#1 | 🪑 Seat: 12A"));
        assert!(text.contains("🌍 Destination: N/A"));
        assert!(text.contains("✔ Total reservations           : 3"));
        assert!(text.contains("business"));
    }

    #[test]
    fn test_report_without_destination_column() {
        let report = ReservationReport::load(&storage(), MASTER, false, None).unwrap();
        assert!(!report.render().contains("Destination"));
    }

    #[test]
    fn test_show_destination() {
        let storage = storage().with_file(
            "reservas_nueva_york.txt",
            "SEAT_NUMBER, PASSENGER_NAME, CLASS, DESTINATION\n1A, Ana, FIRST, NUEVA_YORK\n",
        );

        let report = show_destination(&storage, "reservas_", Destination::NuevaYork)
            .unwrap()
            .unwrap();
        assert_eq!(report.total(), 1);

        assert!(show_destination(&storage, "reservas_", Destination::Lima)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_render_summary_includes_error_log() {
        let summary = ProcessSummary {
            files: vec![FileCount {
                file_name: "reservas_paris.txt".to_string(),
                destination: "PARIS".to_string(),
                count: 1,
            }],
            total_valid: 1,
            rejected: 1,
            error_log: Some("2024-01-01 00:00:00, x, bad\n".to_string()),
        };

        let text = render_summary(&summary);
        assert!(text.contains("reservas_paris.txt (PARIS): 1 reservations"));
        assert!(text.contains("✔ Valid reservations: 1"));
        assert!(text.contains("x, bad"));
    }
}
