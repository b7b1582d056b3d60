pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::core::engine::BuildEngine;
pub use adapters::renderer::WeasyPrintRenderer;
pub use app::pipelines::pdf_pipeline::{BuildPlan, PdfPipeline};
pub use app::runner::execute;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use domain::model::BuildStamp;
pub use utils::error::{PdfError, Result};
