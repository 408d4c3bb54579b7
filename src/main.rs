use clap::Parser;
use drd_wiki::utils::{logger, validation::Validate};
use drd_wiki::{CliConfig, DrdError, GenerationEngine, LocalStorage, RunConfig, WikiPipeline};

fn fail(e: DrdError) -> ! {
    tracing::error!(
        "❌ Page generation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting drd-wiki");
    tracing::debug!("CLI config: {:?}", cli);

    let config = RunConfig::from_cli(&cli).unwrap_or_else(|e| fail(e));

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(e);
    }

    let storage = LocalStorage::new(".");
    let pipeline = WikiPipeline::new(storage, config);
    let engine = GenerationEngine::new(pipeline);

    match engine.run() {
        Ok(report) => {
            tracing::info!(
                "✅ Generated {} entries ({} skipped, {} excluded)",
                report.entries,
                report.skipped.len(),
                report.excluded.len()
            );
            println!("✅ Completed successfully");
            println!("📁 Output saved to: {}", report.output_path.display());
        }
        Err(e) => fail(e),
    }
}
