pub mod play;
pub mod simulate;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_concentration::BoardConfig;

#[derive(Parser)]
#[command(name = "concentration")]
#[command(about = "Find all the pairs before your attempts run out.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON board configuration; flags below override it
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed for the deal (random if omitted)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    #[arg(long, global = true)]
    pub columns: Option<usize>,

    #[arg(long, global = true)]
    pub rows: Option<usize>,

    #[arg(long, global = true)]
    pub max_attempts: Option<u32>,

    /// Number of distinct symbols (defaults to one per pair)
    #[arg(long, global = true)]
    pub symbols: Option<usize>,

    /// Milliseconds both cards stay visible before the turn resolves
    #[arg(long, global = true)]
    pub delay_ms: Option<u64>,

    /// Where the best score is kept
    #[arg(long, global = true, default_value = "concentration_high_score.json")]
    pub high_score_file: PathBuf,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play interactively
    #[command(alias = "p")]
    Play(PlayArgs),
    /// Let an automated player run many games and report statistics
    #[command(alias = "s")]
    Simulate(SimulateArgs),
}

#[derive(Args)]
pub struct PlayArgs {
    /// Continue a saved game
    #[arg(long)]
    pub resume: Option<PathBuf>,

    /// File written by the `save` command
    #[arg(long, default_value = "concentration.save")]
    pub save_file: PathBuf,

    /// Plain output without colors
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Args)]
pub struct SimulateArgs {
    /// Number of games to play
    #[arg(short, long, default_value_t = 1000)]
    pub games: u32,

    #[arg(short, long, value_enum, default_value_t = PolicyKind::Memory)]
    pub policy: PolicyKind,

    /// Print the statistics as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PolicyKind {
    /// Flip random face-down cards
    Random,
    /// Remember every card seen
    Memory,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Defaults, then the config file, then flags.
    pub fn board_config(&self) -> anyhow::Result<BoardConfig> {
        let mut config = match &self.config {
            Some(path) => BoardConfig::from_json_file(path)?,
            None => BoardConfig::default(),
        };

        if let Some(columns) = self.columns {
            config.columns = columns;
        }
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(attempts) = self.max_attempts {
            config.max_attempts = attempts;
        }
        if let Some(symbols) = self.symbols {
            config.symbol_count = Some(symbols);
        }
        if let Some(delay) = self.delay_ms {
            config.reveal_delay_ms = delay;
        }

        config.validate()?;
        Ok(config)
    }
}
