use crate::config::{
    validate_provider, DEFAULT_ASSETS_DIR, DEFAULT_NAME_PREFIX, DEFAULT_RENDERER, DEFAULT_ROOT,
    DEFAULT_SOURCES, DEFAULT_STYLES, DEFAULT_TARGET_DIR, DEFAULT_TEMPLATE,
};
use crate::core::ConfigProvider;
use crate::utils::error::{PdfError, Result};
use crate::utils::validation::Validate;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

fn default_root() -> String {
    DEFAULT_ROOT.to_string()
}

fn default_assets_dir() -> String {
    DEFAULT_ASSETS_DIR.to_string()
}

fn default_sources() -> Vec<String> {
    DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect()
}

fn default_template() -> String {
    DEFAULT_TEMPLATE.to_string()
}

fn default_styles() -> Vec<String> {
    DEFAULT_STYLES.iter().map(|s| s.to_string()).collect()
}

fn default_target_dir() -> String {
    DEFAULT_TARGET_DIR.to_string()
}

fn default_name_prefix() -> String {
    DEFAULT_NAME_PREFIX.to_string()
}

fn default_renderer() -> String {
    DEFAULT_RENDERER.to_string()
}

/// Every section and key is optional; omitted values fall back to the fixed layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub document: DocumentConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub renderer: RendererConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    #[serde(default = "default_name_prefix")]
    pub name_prefix: String,
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,
    pub date: Option<String>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            name_prefix: default_name_prefix(),
            sources: default_sources(),
            date: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_root")]
    pub root: String,
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
    #[serde(default = "default_template")]
    pub template: String,
    #[serde(default = "default_styles")]
    pub styles: Vec<String>,
    #[serde(default = "default_target_dir")]
    pub target_dir: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            assets_dir: default_assets_dir(),
            template: default_template(),
            styles: default_styles(),
            target_dir: default_target_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RendererConfig {
    #[serde(default = "default_renderer")]
    pub command: String,
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            command: default_renderer(),
            extra_args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub emit_html: bool,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|source| PdfError::SourceReadError {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| PdfError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DOCS_ROOT})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl ConfigProvider for TomlConfig {
    fn root_path(&self) -> &str {
        &self.paths.root
    }

    fn assets_dir(&self) -> &str {
        &self.paths.assets_dir
    }

    fn sources(&self) -> &[String] {
        &self.document.sources
    }

    fn template(&self) -> &str {
        &self.paths.template
    }

    fn stylesheets(&self) -> &[String] {
        &self.paths.styles
    }

    fn target_dir(&self) -> &str {
        &self.paths.target_dir
    }

    fn name_prefix(&self) -> &str {
        &self.document.name_prefix
    }

    fn date(&self) -> Option<&str> {
        self.document.date.as_deref()
    }

    fn emit_html(&self) -> bool {
        self.output.emit_html
    }

    fn renderer_command(&self) -> &str {
        &self.renderer.command
    }

    fn renderer_args(&self) -> &[String] {
        &self.renderer.extra_args
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_fixed_layout() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.sources(), ["docs/chap1.md", "docs/chap2.md"]);
        assert_eq!(config.stylesheets(), ["base.css", "custom.css"]);
        assert_eq!(config.assets_dir(), "pdf");
        assert_eq!(config.renderer_command(), "weasyprint");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[document]
name_prefix = "handbook"
sources = ["intro.md", "usage.md", "faq.md"]
date = "2024-03"

[paths]
root = "/srv/docs"
assets_dir = "build"
styles = ["print.css"]

[renderer]
command = "/opt/weasyprint/bin/weasyprint"
extra_args = ["--presentational-hints"]

[output]
emit_html = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.name_prefix(), "handbook");
        assert_eq!(config.sources().len(), 3);
        assert_eq!(config.date(), Some("2024-03"));
        assert_eq!(config.root_path(), "/srv/docs");
        assert_eq!(config.template(), "pdf.html");
        assert_eq!(config.stylesheets(), ["print.css"]);
        assert_eq!(config.renderer_args(), ["--presentational-hints"]);
        assert!(config.emit_html());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("MD_PDF_TEST_ROOT", "/tmp/md-pdf-root");

        let toml_content = r#"
[paths]
root = "${MD_PDF_TEST_ROOT}"
assets_dir = "${MD_PDF_TEST_UNSET_VAR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.root_path(), "/tmp/md-pdf-root");
        assert_eq!(config.assets_dir(), "${MD_PDF_TEST_UNSET_VAR}");

        std::env::remove_var("MD_PDF_TEST_ROOT");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[document]
sources = ["chapter.txt"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let err = TomlConfig::from_toml_str("[document\nname_prefix = 1").unwrap_err();
        assert!(matches!(err, PdfError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[document]
name_prefix = "file-test"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.name_prefix(), "file-test");
    }
}
