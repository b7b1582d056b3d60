use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to read {path}: {source}")]
    SourceReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Source {path} is not valid UTF-8")]
    EncodingError { path: PathBuf },

    #[error("Template error: {0}")]
    TemplateError(#[from] tera::Error),

    #[error("{path}: File exists")]
    TargetIsFileError { path: PathBuf },

    #[error("Failed to start PDF renderer '{command}': {source}")]
    RendererSpawnError {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF renderer '{command}' exited with {status}: {stderr}")]
    RendererFailedError {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Template,
    Output,
    Renderer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PdfError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PdfError::ConfigValidationError { .. }
            | PdfError::InvalidConfigValueError { .. }
            | PdfError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PdfError::SourceReadError { .. } | PdfError::EncodingError { .. } => {
                ErrorCategory::Input
            }
            PdfError::TemplateError(_) => ErrorCategory::Template,
            PdfError::IoError(_) | PdfError::TargetIsFileError { .. } => ErrorCategory::Output,
            PdfError::RendererSpawnError { .. } | PdfError::RendererFailedError { .. } => {
                ErrorCategory::Renderer
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Input | ErrorCategory::Template => {
                ErrorSeverity::High
            }
            ErrorCategory::Renderer => ErrorSeverity::Medium,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    /// Process exit code for a failed run.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PdfError::SourceReadError { path, .. } => {
                format!("Check that {} exists and is readable", path.display())
            }
            PdfError::EncodingError { path } => {
                format!("Re-save {} as UTF-8", path.display())
            }
            PdfError::TemplateError(_) => {
                "Check the page template syntax and the variables it uses (title, date, pages)"
                    .to_string()
            }
            PdfError::TargetIsFileError { path } => format!(
                "Remove or rename the file at {} so the output directory can be created",
                path.display()
            ),
            PdfError::RendererSpawnError { command, .. } => format!(
                "Install '{}' or point --renderer at an HTML-to-PDF program",
                command
            ),
            PdfError::RendererFailedError { .. } => {
                "Inspect the renderer output above; try --emit-html to check the generated HTML"
                    .to_string()
            }
            PdfError::ConfigValidationError { .. }
            | PdfError::InvalidConfigValueError { .. }
            | PdfError::MissingConfigError { .. } => {
                "Fix the configuration value and run again".to_string()
            }
            PdfError::IoError(_) => "Check file permissions and free disk space".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Input => format!("Could not load input file: {}", self),
            ErrorCategory::Template => format!("Could not render page template: {}", self),
            ErrorCategory::Output => format!("Could not write output: {}", self),
            ErrorCategory::Renderer => format!("PDF rendering failed: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, PdfError>;
