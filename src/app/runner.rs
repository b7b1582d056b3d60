use crate::adapters::renderer::WeasyPrintRenderer;
use crate::app::pipelines::pdf_pipeline::{BuildPlan, PdfPipeline};
use crate::config::cli::LocalStorage;
use crate::core::engine::BuildEngine;
use crate::core::ConfigProvider;
use crate::utils::error::PdfError;
use crate::utils::validation::Validate;

/// Validates `config`, builds the PDF (or only prints the plan) and returns
/// the process exit code.
pub async fn execute<C: ConfigProvider + Validate>(config: C, dry_run: bool) -> i32 {
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        return e.exit_code();
    }

    let storage = LocalStorage::new(config.root_path().to_string());
    let renderer = WeasyPrintRenderer::new(
        config.renderer_command(),
        config.renderer_args().to_vec(),
    );
    let pipeline = PdfPipeline::new(storage, config, renderer);

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - nothing will be written");
        let plan = pipeline.plan().await;
        print_plan(&plan);
        if !plan.is_ready() {
            for path in &plan.missing {
                tracing::error!("❌ Missing input: {}", path.display());
            }
            return 1;
        }
        return 0;
    }

    match BuildEngine::new(pipeline).run().await {
        Ok(output_path) => {
            println!("Generated PDF: {}", output_path);
            0
        }
        Err(e) => {
            report_failure(&e);
            e.exit_code()
        }
    }
}

fn report_failure(e: &PdfError) {
    tracing::error!(
        "❌ PDF build failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
}

fn print_plan(plan: &BuildPlan) {
    println!("Sources:");
    for source in &plan.sources {
        println!("  {}", source.display());
    }
    println!("Template: {}", plan.template.display());
    println!("Stylesheets:");
    for stylesheet in &plan.stylesheets {
        println!("  {}", stylesheet.display());
    }
    println!("Target: {}", plan.target.display());
}
