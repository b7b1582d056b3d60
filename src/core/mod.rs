pub mod engine;
pub mod markdown;
pub mod template;

pub use crate::domain::model::{BuildStamp, RenderJob, RenderedDocument, SourceDocument};
pub use crate::domain::ports::{ConfigProvider, PdfRenderer, Pipeline, Storage};
pub use crate::utils::error::Result;
