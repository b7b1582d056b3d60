use clap::Parser;
use md_pdf::utils::logger;
use md_pdf::CliConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(config.verbose, config.json_logs);

    tracing::info!("Starting md-pdf");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let dry_run = config.dry_run;
    let exit_code = md_pdf::execute(config, dry_run).await;
    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}
