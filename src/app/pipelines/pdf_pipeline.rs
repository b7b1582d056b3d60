use crate::core::markdown;
use crate::core::template::TemplateRenderer;
use crate::core::{
    BuildStamp, ConfigProvider, PdfRenderer, Pipeline, RenderJob, RenderedDocument,
    SourceDocument, Storage,
};
use crate::domain::model::PageContext;
use crate::utils::error::{PdfError, Result};
use std::path::{Path, PathBuf};
use url::Url;

const TEMPLATES_DIR: &str = "templates";
const STYLES_DIR: &str = "styles";

/// Inputs and output of a run, resolved against the repository root.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    pub sources: Vec<PathBuf>,
    pub template: PathBuf,
    pub stylesheets: Vec<PathBuf>,
    pub target: PathBuf,
    pub missing: Vec<PathBuf>,
}

impl BuildPlan {
    pub fn is_ready(&self) -> bool {
        self.missing.is_empty()
    }
}

pub struct PdfPipeline<S: Storage, C: ConfigProvider, R: PdfRenderer> {
    storage: S,
    config: C,
    renderer: R,
    stamp: BuildStamp,
}

fn join(base: &str, path: &str) -> String {
    Path::new(base).join(path).to_string_lossy().into_owned()
}

impl<S: Storage, C: ConfigProvider, R: PdfRenderer> PdfPipeline<S, C, R> {
    pub fn new(storage: S, config: C, renderer: R) -> Self {
        let stamp = match config.date() {
            Some(date) => BuildStamp::new(config.name_prefix(), date),
            None => BuildStamp::now(config.name_prefix()),
        };

        Self {
            storage,
            config,
            renderer,
            stamp,
        }
    }

    pub fn template_path(&self) -> String {
        join(
            &join(self.config.assets_dir(), TEMPLATES_DIR),
            self.config.template(),
        )
    }

    pub fn stylesheet_paths(&self) -> Vec<String> {
        let styles_dir = join(self.config.assets_dir(), STYLES_DIR);
        self.config
            .stylesheets()
            .iter()
            .map(|style| join(&styles_dir, style))
            .collect()
    }

    pub fn target_dir_path(&self) -> String {
        join(self.config.assets_dir(), self.config.target_dir())
    }

    pub fn target_path(&self) -> String {
        join(&self.target_dir_path(), &self.stamp.pdf_file_name())
    }

    /// Checks that every input exists without reading or writing anything.
    pub async fn plan(&self) -> BuildPlan {
        let template = self.template_path();
        let stylesheets = self.stylesheet_paths();

        let mut missing = Vec::new();
        let inputs = self
            .config
            .sources()
            .iter()
            .chain(std::iter::once(&template))
            .chain(stylesheets.iter());
        for input in inputs {
            if !self.storage.exists(input).await {
                missing.push(self.storage.resolve(input));
            }
        }

        BuildPlan {
            sources: self
                .config
                .sources()
                .iter()
                .map(|source| self.storage.resolve(source))
                .collect(),
            template: self.storage.resolve(&template),
            stylesheets: stylesheets
                .iter()
                .map(|style| self.storage.resolve(style))
                .collect(),
            target: self.storage.resolve(&self.target_path()),
            missing,
        }
    }

    async fn read_text(&self, path: &str) -> Result<String> {
        let bytes = self.storage.read_file(path).await.map_err(|e| match e {
            PdfError::IoError(source) => PdfError::SourceReadError {
                path: self.storage.resolve(path),
                source,
            },
            other => other,
        })?;

        String::from_utf8(bytes).map_err(|_| PdfError::EncodingError {
            path: self.storage.resolve(path),
        })
    }

    /// `file://` URL of the assets directory, so relative links in the template resolve.
    fn base_url(&self) -> Result<String> {
        let assets = std::path::absolute(self.storage.resolve(self.config.assets_dir()))?;
        Url::from_directory_path(&assets)
            .map(|url| url.to_string())
            .map_err(|_| PdfError::InvalidConfigValueError {
                field: "assets_dir".to_string(),
                value: assets.display().to_string(),
                reason: "Cannot be expressed as a file URL".to_string(),
            })
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, R: PdfRenderer> Pipeline for PdfPipeline<S, C, R> {
    async fn extract(&self) -> Result<Vec<SourceDocument>> {
        let mut sources = Vec::with_capacity(self.config.sources().len());

        for path in self.config.sources() {
            tracing::debug!("Reading {}", path);
            let markdown = self.read_text(path).await?;
            sources.push(SourceDocument {
                path: path.clone(),
                markdown,
            });
        }

        Ok(sources)
    }

    async fn transform(&self, sources: Vec<SourceDocument>) -> Result<RenderedDocument> {
        let pages: Vec<String> = sources
            .iter()
            .map(|source| {
                let html = markdown::to_html(&source.markdown);
                tracing::debug!("{}: {} bytes of HTML", source.path, html.len());
                html
            })
            .collect();

        let template_source = self.read_text(&self.template_path()).await?;
        let renderer = TemplateRenderer::from_source(self.config.template(), &template_source)?;

        let html = renderer.render(&PageContext {
            title: self.stamp.title(),
            date: self.stamp.date.clone(),
            pages: pages.clone(),
        })?;

        Ok(RenderedDocument {
            stamp: self.stamp.clone(),
            pages,
            html,
        })
    }

    async fn load(&self, document: RenderedDocument) -> Result<String> {
        let target_dir = self.target_dir_path();
        self.storage.ensure_dir(&target_dir).await?;

        if self.config.emit_html() {
            let html_path = join(&target_dir, &document.stamp.html_file_name());
            self.storage
                .write_file(&html_path, document.html.as_bytes())
                .await?;
            tracing::info!("Intermediate HTML written to {}", html_path);
        }

        let target = self
            .storage
            .resolve(&join(&target_dir, &document.stamp.pdf_file_name()));
        let job = RenderJob {
            html: document.html,
            base_url: self.base_url()?,
            stylesheets: self
                .stylesheet_paths()
                .iter()
                .map(|style| self.storage.resolve(style))
                .collect(),
            target: target.clone(),
        };

        tracing::debug!(
            "Rendering with {} ({} stylesheets, base {})",
            self.renderer.name(),
            job.stylesheets.len(),
            job.base_url
        );
        self.renderer.render(&job).await?;

        Ok(target.display().to_string())
    }
}
