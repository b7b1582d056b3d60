use crate::domain::model::{RenderJob, RenderedDocument, SourceDocument};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Filesystem access rooted at the repository root. All paths are relative to it.
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Creates a single directory level. Fails if `path` is a plain file.
    fn ensure_dir(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
    fn resolve(&self, path: &str) -> PathBuf;
}

pub trait ConfigProvider: Send + Sync {
    fn root_path(&self) -> &str;
    /// Directory holding `templates/`, `styles/` and the output directory.
    fn assets_dir(&self) -> &str;
    fn sources(&self) -> &[String];
    fn template(&self) -> &str;
    fn stylesheets(&self) -> &[String];
    fn target_dir(&self) -> &str;
    fn name_prefix(&self) -> &str;
    /// Fixed `YYYY-MM`; `None` means the current month.
    fn date(&self) -> Option<&str>;
    fn emit_html(&self) -> bool;
    fn renderer_command(&self) -> &str;
    fn renderer_args(&self) -> &[String];
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<SourceDocument>>;
    async fn transform(&self, sources: Vec<SourceDocument>) -> Result<RenderedDocument>;
    async fn load(&self, document: RenderedDocument) -> Result<String>;
}

/// An HTML-to-PDF engine. Writes the PDF to `job.target`.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    fn name(&self) -> &str;
    async fn render(&self, job: &RenderJob) -> Result<()>;
}
