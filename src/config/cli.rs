use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "points-bot")]
#[command(about = "Telegram bot that fetches student points from a university portal")]
pub struct CliArgs {
    #[arg(long, default_value = "points-bot.toml")]
    pub config: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
