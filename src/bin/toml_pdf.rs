use anyhow::Context;
use clap::Parser;
use md_pdf::utils::logger;
use md_pdf::TomlConfig;

#[derive(Parser)]
#[command(name = "toml-pdf")]
#[command(about = "Build the dated PDF from a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "md-pdf.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Override the build month (YYYY-MM)
    #[arg(long)]
    date: Option<String>,

    /// Override the emit_html setting from config
    #[arg(long)]
    emit_html: Option<bool>,

    /// Dry run - show what would be built without writing anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_logger(args.verbose, args.json_logs);

    tracing::info!("🚀 Starting TOML-based md-pdf");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = TomlConfig::from_file(&args.config).with_context(|| {
        format!(
            "Failed to load config file '{}'; make sure it exists and is valid TOML",
            args.config
        )
    })?;

    // 應用命令列覆蓋設定
    if let Some(date) = args.date {
        tracing::info!("🔧 Build month overridden to: {}", date);
        config.document.date = Some(date);
    }
    if let Some(emit_html) = args.emit_html {
        config.output.emit_html = emit_html;
    }

    if args.verbose {
        tracing::debug!("TOML config: {:?}", config);
    }

    let exit_code = md_pdf::execute(config, args.dry_run).await;
    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
