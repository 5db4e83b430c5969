use clap::Parser;
use job_alert::config::toml_config::SettingsFile;
use job_alert::utils::{logger, validation::Validate};
use job_alert::{AlertEngine, AppConfig, CliArgs, DiscordNotifier, FileSeenStore, SerpApiFetcher};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting job-alert");

    let mut config = AppConfig::from_env()?;
    if let Some(path) = &args.config {
        tracing::info!("📁 Loading settings from: {}", path);
        config.apply_settings(SettingsFile::from_file(path)?)?;
    }
    if let Some(interval) = args.interval {
        config.set_interval_seconds("--interval", interval)?;
    }

    // 缺少金鑰不阻止執行，第一次請求時才會失敗
    if let Err(e) = config.validate() {
        tracing::warn!("⚠️ Configuration incomplete: {}", e);
    }

    if args.verbose {
        tracing::debug!(
            "Search: {} (location: {}, site: {}), seen ids: {}, roles: {}",
            config.search_endpoint,
            config.location,
            config.site_filter,
            config.seen_ids_file,
            config.taxonomy.len()
        );
    }

    let client = config.http_client()?;
    let config = Arc::new(config);

    let engine = AlertEngine::new(
        FileSeenStore::new(config.seen_ids_file.clone()),
        SerpApiFetcher::with_client(Arc::clone(&config), client.clone()),
        DiscordNotifier::with_client(Arc::clone(&config), client),
        config.taxonomy.clone(),
    )
    .with_dry_run(args.dry_run);

    if args.watch {
        tracing::info!("👀 Watch mode: one cycle every {}s", config.interval_seconds);
        engine.run_forever(config.interval()).await;
        return Ok(());
    }

    match engine.run_cycle().await {
        Ok(report) => {
            tracing::debug!(
                "Cycle finished: {} new, {} delivered, {} rejected, persisted: {}",
                report.new_postings,
                report.delivered,
                report.rejected.len(),
                report.persisted
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Cycle failed: {}", e);
            Err(e.into())
        }
    }
}
