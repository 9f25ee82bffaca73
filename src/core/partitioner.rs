use crate::core::processor::DEFAULT_OUTPUT_PREFIX;
use crate::core::reader::parse_rows;
use crate::core::validator::validate_records;
use crate::core::writer::write_groups;
use crate::domain::model::{FieldKind, PartitionPlan, ProcessSummary, RawRow, Schema};
use crate::domain::ports::{Pipeline, Storage};
use crate::utils::error::{ReservationError, Result};

/// 將主檔依某一欄的值拆成多個檔案。每一組先經過整批驗證，
/// 任何一組失敗就不寫出任何檔案。
pub struct DestinationPartitioner<S: Storage> {
    storage: S,
    master_file: String,
    key: FieldKind,
    schema: Schema,
    output_prefix: String,
}

impl<S: Storage> DestinationPartitioner<S> {
    pub fn new(
        storage: S,
        master_file: impl Into<String>,
        key: FieldKind,
        schema: Schema,
    ) -> Result<Self> {
        if !schema.has_destination {
            return Err(ReservationError::ConfigError {
                message: "partitioning by destination requires the destination column".to_string(),
            });
        }

        Ok(Self {
            storage,
            master_file: master_file.into(),
            key,
            schema,
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
        })
    }

    pub fn with_output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output_prefix = prefix.into();
        self
    }
}

impl<S: Storage> Pipeline for DestinationPartitioner<S> {
    fn extract(&self) -> Result<Vec<RawRow>> {
        let data = self.storage.read_file(&self.master_file)?;
        let mut rows = parse_rows(&data)?;

        if rows
            .first()
            .is_some_and(|row| row.width() == self.schema.width() && row.is_header())
        {
            rows.remove(0);
        }

        Ok(rows)
    }

    fn transform(&self, rows: Vec<RawRow>) -> Result<PartitionPlan> {
        let mut plan = PartitionPlan::default();

        for row in rows {
            let label = row.field(self.key).unwrap_or_default().to_string();
            plan.push(&label, row);
        }

        if plan.groups.is_empty() {
            tracing::info!("No reservations to partition by {}", self.key);
            return Ok(plan);
        }

        for group in &plan.groups {
            if let Err(e) = validate_records(&group.rows, self.schema.width()) {
                tracing::error!("❌ Group '{}' failed validation: {}", group.label, e);
                return Err(e);
            }
        }

        Ok(plan)
    }

    fn load(&self, plan: PartitionPlan) -> Result<ProcessSummary> {
        let files = write_groups(
            &self.storage,
            &self.output_prefix,
            &self.schema.header_line(),
            &plan.groups,
            &[self.master_file.as_str()],
        )?;

        Ok(ProcessSummary {
            total_valid: plan.valid_count(),
            rejected: 0,
            files,
            error_log: None,
        })
    }
}
