use anyhow::Context;
use clap::Parser;
use watchbot::adapters::build_sink;
use watchbot::app::pipelines::MenuDay;
use watchbot::config::LogFormat;
use watchbot::utils::{logger, validation::Validate};
use watchbot::{EnvOverrides, MenuArgs, MenuNotifier, RunEngine, WatchError};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = MenuArgs::parse();
    let env = EnvOverrides::from_env();

    match args.common.log_format {
        LogFormat::Compact => logger::init_cli_logger(args.common.verbose),
        LogFormat::Json => logger::init_json_logger(args.common.verbose),
    }

    let exit_code = match run(&args, env).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("❌ Menu bot failed: {:#}", e);
            if let Some(watch_error) = e.downcast_ref::<WatchError>() {
                eprintln!("❌ {}", watch_error.user_friendly_message());
                eprintln!("💡 Suggestion: {}", watch_error.recovery_suggestion());
            }
            1
        }
    };
    std::process::exit(exit_code);
}

async fn run(args: &MenuArgs, env: watchbot::Result<EnvOverrides>) -> anyhow::Result<i32> {
    let env = env?;
    if let Some(path) = &env.dotenv_file {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let config = args.load_config(&env).context("loading configuration")?;
    config.validate()?;

    let sink = build_sink(&config)?;
    let notifier = MenuNotifier::new(sink, config.menu.clone());
    tracing::info!(
        "🍽️ Menu bot started - {}",
        notifier.date().format("%d.%m.%Y %A")
    );

    let report = RunEngine::new(notifier).run().await?;

    if report.delivery_failed() {
        tracing::error!("❌ Menu message could not be delivered");
        return Ok(1);
    }

    match (report.day, report.delivered) {
        (MenuDay::FullMenu | MenuDay::Notice, Some(true)) => {
            println!("✅ Menu for {} posted", report.date)
        }
        (_, Some(true)) => println!("ℹ️ No menu for {} - fallback message posted", report.date),
        _ => println!("ℹ️ No menu for {} - nothing posted", report.date),
    }
    Ok(0)
}
