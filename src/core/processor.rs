use crate::core::reader::parse_rows;
use crate::core::validator::validate_field;
use crate::core::writer::write_groups;
use crate::domain::model::{
    FieldKind, PartitionPlan, ProcessSummary, RawRow, Rejection, RowStatus, Schema,
};
use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
use crate::utils::error::Result;
use crate::utils::validation::validate_range;

pub const DEFAULT_ERROR_LOG: &str = "registro_errores.log";
pub const DEFAULT_OUTPUT_PREFIX: &str = "reservas_";

/// 三欄檔案沒有目的地，合法列全部歸到這一組
pub const NO_DESTINATION_LABEL: &str = "SIN_DESTINO";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 逐列驗證輸入檔：錯誤列寫入錯誤紀錄後略過，合法列依目的地分檔
pub struct ReservationProcessor<S: Storage> {
    storage: S,
    input: String,
    expected_width: usize,
    error_log: String,
    output_prefix: String,
}

impl<S: Storage> ReservationProcessor<S> {
    pub fn new(storage: S, input: impl Into<String>, expected_width: usize) -> Self {
        Self {
            storage,
            input: input.into(),
            expected_width,
            error_log: DEFAULT_ERROR_LOG.to_string(),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
        }
    }

    pub fn from_config<C: ConfigProvider>(
        storage: S,
        config: &C,
        input: impl Into<String>,
        expected_width: usize,
    ) -> Self {
        Self::new(storage, input, expected_width)
            .with_error_log(config.error_log())
            .with_output_prefix(config.output_prefix())
    }

    pub fn with_error_log(mut self, error_log: impl Into<String>) -> Self {
        self.error_log = error_log.into();
        self
    }

    pub fn with_output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output_prefix = prefix.into();
        self
    }

    /// 判定單列狀態：先比對欄數，再依序驗證各欄
    pub fn classify(&self, row: &RawRow) -> RowStatus {
        if row.width() != self.expected_width {
            return RowStatus::RejectedWidth {
                expected: self.expected_width,
                found: row.width(),
            };
        }

        for (field, kind) in row.fields.iter().zip(FieldKind::ALL.iter()) {
            if let Err(e) = validate_field(field, *kind) {
                return RowStatus::RejectedField {
                    kind: *kind,
                    reason: e.to_string(),
                };
            }
        }

        RowStatus::Accepted
    }

    fn schema(&self) -> Schema {
        Schema {
            has_destination: self.expected_width == Schema::WITH_DESTINATION.width(),
        }
    }
}

impl<S: Storage> Pipeline for ReservationProcessor<S> {
    fn extract(&self) -> Result<Vec<RawRow>> {
        validate_range(
            "expected_width",
            self.expected_width,
            Schema::WITHOUT_DESTINATION.width(),
            Schema::WITH_DESTINATION.width(),
        )?;

        tracing::debug!("Reading {}", self.storage.resolve(&self.input).display());
        let data = self.storage.read_file(&self.input)?;
        parse_rows(&data)
    }

    fn transform(&self, rows: Vec<RawRow>) -> Result<PartitionPlan> {
        let mut plan = PartitionPlan::default();

        for (index, row) in rows.into_iter().enumerate() {
            // 只有第一列且欄數相符的標題列會略過，其餘一律分類
            if index == 0 && row.width() == self.expected_width && row.is_header() {
                tracing::debug!("Skipping header at line {}", row.line);
                continue;
            }

            match self.classify(&row) {
                RowStatus::Accepted => {
                    let label = row
                        .field(FieldKind::Destination)
                        .unwrap_or(NO_DESTINATION_LABEL)
                        .to_string();
                    plan.push(&label, row);
                }
                status => {
                    tracing::warn!(
                        "⚠️ Line {} rejected: {}",
                        row.line,
                        status.reason().unwrap_or_default()
                    );
                    plan.rejections.push(Rejection {
                        timestamp: chrono::Utc::now().format(TIMESTAMP_FORMAT).to_string(),
                        row,
                        status,
                    });
                }
            }
        }

        Ok(plan)
    }

    fn load(&self, plan: PartitionPlan) -> Result<ProcessSummary> {
        let files = write_groups(
            &self.storage,
            &self.output_prefix,
            &self.schema().header_line(),
            &plan.groups,
            &[self.input.as_str(), self.error_log.as_str()],
        )?;

        // 錯誤紀錄每次執行都重新寫入
        let mut log = String::new();
        for rejection in &plan.rejections {
            log.push_str(&rejection.log_line());
            log.push('\n');
        }
        self.storage.write_file(&self.error_log, log.as_bytes())?;

        Ok(ProcessSummary {
            total_valid: plan.valid_count(),
            rejected: plan.rejections.len(),
            files,
            error_log: (!log.is_empty()).then_some(log),
        })
    }
}
