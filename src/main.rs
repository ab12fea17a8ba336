use campaign_countdown::core::{Clock, CountdownSettings, TargetInstant};
use campaign_countdown::utils::error::{CountdownError, ErrorSeverity};
use campaign_countdown::utils::{logger, validation::Validate};
use campaign_countdown::{
    CliConfig, CountdownEngine, EngineOptions, FixedClock, SystemClock, TerminalSink, TokioScheduler,
};
use clap::Parser;

fn fail(e: &CountdownError) -> ! {
    tracing::error!(
        "❌ Countdown failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::High => 1, // 設定或檔案錯誤
        ErrorSeverity::Critical => 3, // 系統錯誤
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    logger::log_banner();

    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = cli.load_settings().unwrap_or_else(|e| fail(&e));
    if let Err(e) = config.validate().and_then(|_| cli.validate()) {
        fail(&e);
    }

    let targets = config.targets().unwrap_or_else(|e| fail(&e));
    let options = EngineOptions::from_settings(&config);
    tracing::info!("✅ Loaded {} countdown target(s)", targets.len());
    for target in &targets {
        tracing::debug!("Target '{}' at {}", target.label, target.at);
    }

    match cli.pinned_now(config.zone()).unwrap_or_else(|e| fail(&e)) {
        Some(now) => {
            tracing::info!("🕒 Clock pinned to {}", now);
            run(FixedClock::new(now), &cli, targets, options).await
        }
        None => run(SystemClock, &cli, targets, options).await,
    }
}

async fn run<C: Clock + 'static>(
    clock: C,
    cli: &CliConfig,
    targets: Vec<TargetInstant>,
    options: EngineOptions,
) -> anyhow::Result<()> {
    let sink = TerminalSink::new(std::io::stdout(), cli.output_format());
    let mut engine = CountdownEngine::with_options(clock, sink, TokioScheduler::new(), options);

    if let Err(e) = engine.start(targets) {
        fail(&e);
    }

    if cli.once {
        engine.stop();
        return Ok(());
    }

    let requested_ticks = async {
        match cli.ticks {
            Some(n) => engine.wait_for_scheduled_ticks(u64::from(n)).await,
            // 未指定 --ticks 時只等 Ctrl+C
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result?;
            tracing::info!("Interrupted, stopping countdown");
        }
        _ = requested_ticks => {
            tracing::info!("Reached the requested number of ticks");
        }
    }

    engine.stop();
    Ok(())
}
