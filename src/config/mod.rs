pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extensions, validate_non_empty_list, validate_non_empty_string, validate_path,
    validate_year_month,
};

pub const DEFAULT_ROOT: &str = ".";
pub const DEFAULT_ASSETS_DIR: &str = "pdf";
pub const DEFAULT_SOURCES: [&str; 2] = ["docs/chap1.md", "docs/chap2.md"];
pub const DEFAULT_TEMPLATE: &str = "pdf.html";
pub const DEFAULT_STYLES: [&str; 2] = ["base.css", "custom.css"];
pub const DEFAULT_TARGET_DIR: &str = "target";
pub const DEFAULT_NAME_PREFIX: &str = "pdf";
pub const DEFAULT_RENDERER: &str = "weasyprint";

const SOURCE_EXTENSIONS: [&str; 2] = ["md", "markdown"];
const STYLE_EXTENSIONS: [&str; 1] = ["css"];

/// Checks shared by every configuration front-end.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_path("root", config.root_path())?;
    validate_path("assets_dir", config.assets_dir())?;
    validate_path("template", config.template())?;
    validate_path("target_dir", config.target_dir())?;

    validate_non_empty_list("sources", config.sources())?;
    validate_file_extensions("sources", config.sources(), &SOURCE_EXTENSIONS)?;
    validate_file_extensions("styles", config.stylesheets(), &STYLE_EXTENSIONS)?;

    validate_non_empty_string("name_prefix", config.name_prefix())?;
    validate_non_empty_string("renderer", config.renderer_command())?;

    if let Some(date) = config.date() {
        validate_year_month("date", date)?;
    }

    Ok(())
}

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use super::*;
    use crate::utils::validation::Validate;
    use clap::Parser;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "md-pdf")]
    #[command(about = "Render a fixed set of markdown documents into a dated PDF")]
    pub struct CliConfig {
        /// Repository root; every other path is resolved from here
        #[arg(long, default_value = DEFAULT_ROOT)]
        pub root: String,

        /// Directory holding templates/, styles/ and the output directory
        #[arg(long, default_value = DEFAULT_ASSETS_DIR)]
        pub assets_dir: String,

        #[arg(long, value_delimiter = ',', default_values = DEFAULT_SOURCES)]
        pub sources: Vec<String>,

        /// Template file name inside <assets-dir>/templates
        #[arg(long, default_value = DEFAULT_TEMPLATE)]
        pub template: String,

        /// Stylesheet file names inside <assets-dir>/styles
        #[arg(long, value_delimiter = ',', default_values = DEFAULT_STYLES)]
        pub styles: Vec<String>,

        /// Output directory inside <assets-dir>
        #[arg(long, default_value = DEFAULT_TARGET_DIR)]
        pub target_dir: String,

        #[arg(long, default_value = DEFAULT_NAME_PREFIX)]
        pub name_prefix: String,

        /// Build for a fixed YYYY-MM instead of the current month
        #[arg(long)]
        pub date: Option<String>,

        /// HTML-to-PDF program
        #[arg(long, default_value = DEFAULT_RENDERER)]
        pub renderer: String,

        /// Extra argument passed to the renderer (repeatable)
        #[arg(long = "renderer-arg", allow_hyphen_values = true)]
        pub renderer_args: Vec<String>,

        /// Also write the intermediate HTML next to the PDF
        #[arg(long)]
        pub emit_html: bool,

        /// Print the resolved inputs and output without writing anything
        #[arg(long)]
        pub dry_run: bool,

        #[arg(short, long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON lines")]
        pub json_logs: bool,
    }

    impl Default for CliConfig {
        fn default() -> Self {
            Self::parse_from(["md-pdf"])
        }
    }

    impl ConfigProvider for CliConfig {
        fn root_path(&self) -> &str {
            &self.root
        }

        fn assets_dir(&self) -> &str {
            &self.assets_dir
        }

        fn sources(&self) -> &[String] {
            &self.sources
        }

        fn template(&self) -> &str {
            &self.template
        }

        fn stylesheets(&self) -> &[String] {
            &self.styles
        }

        fn target_dir(&self) -> &str {
            &self.target_dir
        }

        fn name_prefix(&self) -> &str {
            &self.name_prefix
        }

        fn date(&self) -> Option<&str> {
            self.date.as_deref()
        }

        fn emit_html(&self) -> bool {
            self.emit_html
        }

        fn renderer_command(&self) -> &str {
            &self.renderer
        }

        fn renderer_args(&self) -> &[String] {
            &self.renderer_args
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            validate_provider(self)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_defaults_match_fixed_layout() {
            let config = CliConfig::default();

            assert_eq!(config.root_path(), ".");
            assert_eq!(config.assets_dir(), "pdf");
            assert_eq!(config.sources(), ["docs/chap1.md", "docs/chap2.md"]);
            assert_eq!(config.template(), "pdf.html");
            assert_eq!(config.stylesheets(), ["base.css", "custom.css"]);
            assert_eq!(config.target_dir(), "target");
            assert_eq!(config.name_prefix(), "pdf");
            assert_eq!(config.date(), None);
            assert_eq!(config.renderer_command(), "weasyprint");
            assert!(!config.emit_html());
            assert!(config.validate().is_ok());
        }

        #[test]
        fn test_flags_override_defaults() {
            let config = CliConfig::parse_from([
                "md-pdf",
                "--sources",
                "a.md,b.md,c.md",
                "--date",
                "2024-03",
                "--renderer-arg",
                "--presentational-hints",
                "--emit-html",
            ]);

            assert_eq!(config.sources(), ["a.md", "b.md", "c.md"]);
            assert_eq!(config.date(), Some("2024-03"));
            assert_eq!(config.renderer_args(), ["--presentational-hints"]);
            assert!(config.emit_html());
        }

        #[test]
        fn test_validation_rejects_bad_values() {
            let mut config = CliConfig::default();
            config.date = Some("2024/03".to_string());
            assert!(config.validate().is_err());

            let mut config = CliConfig::default();
            config.styles = vec!["base.scss".to_string()];
            assert!(config.validate().is_err());

            let mut config = CliConfig::default();
            config.sources.clear();
            assert!(config.validate().is_err());
        }
    }
}
