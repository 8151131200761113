use anyhow::Context;
use clap::Parser;
use watchbot::adapters::{build_sink, HttpPageFetcher, JsonFileCache};
use watchbot::app::pipelines::SourceOutcome;
use watchbot::config::LogFormat;
use watchbot::utils::{logger, validation::Validate};
use watchbot::{EnvOverrides, MonitorArgs, PageMonitor, RunEngine, WatchError};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = MonitorArgs::parse();
    // .env has to be read before the log filter looks at RUST_LOG
    let env = EnvOverrides::from_env();

    match args.common.log_format {
        LogFormat::Compact => logger::init_cli_logger(args.common.verbose),
        LogFormat::Json => logger::init_json_logger(args.common.verbose),
    }

    if let Err(e) = run(&args, env).await {
        tracing::error!("❌ Unexpected failure: {:#}", e);
        match e.downcast_ref::<WatchError>() {
            Some(watch_error) => {
                eprintln!("❌ {}", watch_error.user_friendly_message());
                eprintln!("💡 Suggestion: {}", watch_error.recovery_suggestion());
            }
            None => eprintln!("❌ {:#}", e),
        }
        std::process::exit(1);
    }
}

async fn run(args: &MonitorArgs, env: watchbot::Result<EnvOverrides>) -> anyhow::Result<()> {
    let env = env?;
    if let Some(path) = &env.dotenv_file {
        tracing::debug!("Loaded environment from {}", path.display());
    }
    if let Some(run) = &env.github {
        tracing::info!("🏃 GitHub Actions runner: {}", run.runner_os.as_deref().unwrap_or("unknown"));
        tracing::info!("📦 Repository: {}", run.repository);
        tracing::info!("🔄 Run ID: {}", run.run_id);
    }

    let config = args.load_config(&env).context("loading configuration")?;
    config.validate()?;

    tracing::info!("🤖 Page monitor started (test mode: {})", config.test_mode);
    tracing::info!("📁 Cache file: {}", config.monitor.cache_path);
    tracing::info!("📋 Watching {} page(s)", config.monitor.sources.len());
    if args.common.verbose {
        tracing::debug!("Monitor config: {:?}", config.monitor);
    }

    let sink = build_sink(&config)?;
    let fetcher = HttpPageFetcher::new(&config.monitor.user_agent, config.monitor.fetch_timeout())?;
    let cache = JsonFileCache::new(&config.monitor.cache_path);

    let engine = RunEngine::new(PageMonitor::new(fetcher, sink, cache, config.monitor.clone()));
    let report = engine.run().await?;

    for source in &report.sources {
        match &source.outcome {
            SourceOutcome::Unavailable { reason } => {
                tracing::warn!("⚠️ {}: unavailable ({})", source.source.display_name, reason)
            }
            SourceOutcome::Counted {
                current, delivered, ..
            } => tracing::info!(
                "📄 {}: {} rows, notified: {}",
                source.source.display_name,
                current,
                match delivered {
                    Some(true) => "yes",
                    Some(false) => "failed",
                    None => "no",
                }
            ),
        }
    }

    if report.updates_found() {
        println!("✅ Monitoring finished - notifications sent");
    } else {
        println!("✅ Monitoring finished - nothing sent");
    }
    Ok(())
}
