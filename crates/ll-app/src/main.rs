use anyhow::Result;
use clap::Parser;

pub mod cli;
pub mod pipeline;
pub mod play;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging (stderr : stdout appartient au player)
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Dispatcher
    match cli.command {
        cli::Command::Encode(ref args) => pipeline::run_encode(args),
        cli::Command::Play { ref artifact } => play::run_play(artifact),
    }
}
