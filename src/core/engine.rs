use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

/// Drives a pipeline through extract, transform and load, stopping at the
/// first failure.
pub struct BuildEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> BuildEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("Starting PDF build");

        tracing::info!("Loading markdown sources...");
        let sources = self.pipeline.extract().await?;
        tracing::info!("Loaded {} markdown files", sources.len());

        tracing::info!("Rendering HTML...");
        let document = self.pipeline.transform(sources).await?;
        tracing::info!(
            "Rendered {} pages into {} bytes of HTML",
            document.pages.len(),
            document.html.len()
        );

        tracing::info!("Writing PDF...");
        let output_path = self.pipeline.load(document).await?;
        tracing::info!("PDF written to {} in {:?}", output_path, started.elapsed());

        Ok(output_path)
    }
}
