//! Terminal front-end for the concentration game.

mod commands;
mod logging;

use commands::{CommandLine, Commands};

fn main() -> anyhow::Result<()> {
    let cli = CommandLine::parse_args();
    logging::init(cli.verbose);

    let config = cli.board_config()?;
    let seed = cli.seed.unwrap_or_else(rand::random);

    match cli.command {
        Commands::Play(args) => commands::play::play(config, seed, &cli.high_score_file, args),
        Commands::Simulate(args) => commands::simulate::simulate(config, seed, args),
    }
}
