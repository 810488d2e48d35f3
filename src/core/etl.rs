use crate::core::{LoadReport, Pipeline, ReviewStatus};
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<LoadReport> {
        tracing::info!("🚀 Starting geocoding run");

        // Extract
        let records = self.pipeline.extract().await?;
        tracing::info!("📥 Extracted {} rows", records.len());

        // Transform
        let result = self.pipeline.transform(records).await?;
        tracing::info!(
            "🔄 Geocoded {} rows ({} pending review, {} errors)",
            result.records.len(),
            result.count_with_status(ReviewStatus::Pending),
            result.count_with_status(ReviewStatus::Error)
        );

        // Load: everything is buffered until here, so nothing is on disk before this point
        let report = self.pipeline.load(result).await?;
        match (&report.table_path, &report.review_path) {
            (Some(table), Some(review)) => {
                tracing::info!("📁 Output saved to: {}", table);
                tracing::info!("📄 Review page saved to: {}", review);
            }
            _ => tracing::warn!("No rows in input; no output written"),
        }

        Ok(report)
    }
}
