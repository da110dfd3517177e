use clap::Parser;
use points_bot::utils::{logger, validation::Validate};
use points_bot::{Bot, BotConfig, CliArgs, PortalClient, TelegramApi};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = CliArgs::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("Starting points-bot");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    let config = match BotConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load config from {}: {}", args.config, e);
            eprintln!("❌ Failed to load config from {}: {}", args.config, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let api = TelegramApi::new(config.telegram.api_base(), &config.telegram.token)?;
    let portal = PortalClient::new(Arc::new(config.portal.clone()));

    let bot = Bot::new(api, portal);
    bot.run().await?;

    Ok(())
}
