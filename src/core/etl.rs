use crate::core::Pipeline;
use crate::domain::model::RunReport;
use crate::utils::error::Result;

/// Runs extract, transform and load in order; nothing is written unless all stages succeed.
pub struct GenerationEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> GenerationEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn run(&self) -> Result<RunReport> {
        tracing::info!("Starting page generation...");

        // Extract
        let loaded = self.pipeline.extract()?;
        tracing::info!(
            "📥 Loaded {} records ({} skipped)",
            loaded.records.len(),
            loaded.skipped.len()
        );

        // Transform
        let catalog = self.pipeline.transform(loaded)?;
        tracing::info!(
            "🗂️ Arranged {} entries in {} sections",
            catalog.entry_count(),
            catalog.sections.len()
        );

        // Load
        let output_path = self.pipeline.load(&catalog)?;
        tracing::info!("📝 Page written to {}", output_path.display());

        if !catalog.skipped.is_empty() {
            tracing::warn!(
                "⚠️ {} record(s) were skipped, see warnings above",
                catalog.skipped.len()
            );
        }

        Ok(RunReport {
            output_path,
            entries: catalog.entry_count(),
            skipped: catalog.skipped,
            excluded: catalog.excluded,
        })
    }
}
