use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod commands;
mod output;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Find the best nearby place to mine a material or sell your cargo"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find the best nearby hotspot ring to mine a material.
    Mine(commands::mine::MineArgs),
    /// Find the best nearby station to sell a commodity.
    Sell(commands::sell::SellArgs),
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Mine(args) => commands::mine::handle_mine(&args),
        Command::Sell(args) => commands::sell::handle_sell(&args),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
