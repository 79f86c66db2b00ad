use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rust_concentration::agents::simulate as run_games;
use rust_concentration::{BoardConfig, ConcentrationGame, MemoryPolicy, Policy, RandomPolicy};

use super::{PolicyKind, SimulateArgs};

pub fn simulate(config: BoardConfig, seed: u64, args: SimulateArgs) -> anyhow::Result<()> {
    let mut game = ConcentrationGame::new(config)?;
    let mut policy: Box<dyn Policy> = match args.policy {
        PolicyKind::Random => Box::new(RandomPolicy),
        PolicyKind::Memory => Box::new(MemoryPolicy::new()),
    };

    let pb = ProgressBar::new(u64::from(args.games));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} [{bar:30.cyan/blue}] {pos}/{len} games {msg}")?
            .progress_chars("=> "),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    let mut wins = 0u32;
    let stats = run_games(
        &mut game,
        |g, s| g.new_state(s),
        policy.as_mut(),
        args.games,
        seed,
        |_, episode| {
            if episode.result.is_some_and(|r| r.is_win()) {
                wins += 1;
            }
            pb.set_message(format!("({} won)", wins));
            pb.inc(1);
        },
    )?;
    pb.finish_and_clear();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", format!("{} policy, seed {}", policy.name(), seed).bold());
    println!("games        {}", stats.games);
    println!(
        "wins         {} ({:.1}%)",
        stats.wins.to_string().green(),
        stats.win_rate() * 100.0
    );
    println!("losses       {}", stats.losses.to_string().red());
    if stats.unfinished > 0 {
        println!("unfinished   {}", stats.unfinished);
    }
    println!("mean score   {:.2}", stats.mean_score());
    println!("best score   {}", stats.best_score);
    println!("mean turns   {:.2}", stats.mean_turns());

    Ok(())
}
