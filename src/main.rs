use annuaire::utils::error::{AnnuaireError, ErrorSeverity};
use annuaire::utils::{logger, validation::Validate};
use annuaire::{app, AppConfig, Cli, Command};
use anyhow::Context;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(&cli.config)
        .with_context(|| format!("failed to load config file '{}'", cli.config))?;
    cli.apply_overrides(&mut config);

    if config.logging.json {
        logger::init_json_logger(&config.logging.level);
    } else {
        logger::init_cli_logger(cli.verbose, &config.logging.level);
    }

    tracing::info!("Starting annuaire");
    tracing::debug!("Config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let outcome = match cli.command {
        Command::Serve { .. } => app::serve(&config).await,
        Command::Seed { .. } => app::load_fixtures(&config).await.map(|report| {
            println!("✅ Inserted {} people", report.len());
        }),
    };

    if let Err(e) = outcome {
        exit_with(e);
    }
    Ok(())
}

fn exit_with(e: AnnuaireError) -> ! {
    tracing::error!(
        "❌ annuaire failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
