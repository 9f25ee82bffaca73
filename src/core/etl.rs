use crate::domain::model::ProcessSummary;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<ProcessSummary> {
        tracing::info!("Starting reservation run...");

        // Extract
        let rows = self.pipeline.extract()?;
        tracing::info!("Extracted {} rows", rows.len());

        // Transform
        let plan = self.pipeline.transform(rows)?;
        tracing::info!(
            "Accepted {} rows into {} groups, rejected {}",
            plan.valid_count(),
            plan.groups.len(),
            plan.rejections.len()
        );

        // Load
        let summary = self.pipeline.load(plan)?;
        tracing::info!("Wrote {} files", summary.files.len());

        Ok(summary)
    }
}
