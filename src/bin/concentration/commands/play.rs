use std::io::{self, BufRead, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use colored::Colorize;
use rust_concentration::render::{parse_coordinate, render_board};
use rust_concentration::{
    BoardConfig, ConcentrationGameBuilder, JsonFileStore, RulesEngine, SavedGame, Session,
    TurnOutcome,
};

use super::PlayArgs;

const HELP: &str = "Enter a cell like B3 to flip it. Other commands: \
                    restart (r), save (s), help (h), quit (q).";

pub fn play(config: BoardConfig, seed: u64, high_score_file: &Path, args: PlayArgs) -> anyhow::Result<()> {
    if args.no_color {
        colored::control::set_override(false);
    }
    let color = !args.no_color;
    let store = JsonFileStore::new(high_score_file);

    // A saved game brings its own board configuration.
    let mut session = match &args.resume {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("failed to read saved game {}", path.display()))?;
            Session::resume(SavedGame::from_bytes(&bytes)?, store)?
        }
        None => Session::new(ConcentrationGameBuilder::from_config(config), store, seed)?,
    };
    let delay = Duration::from_millis(session.game().config().reveal_delay_ms);

    println!("{}", HELP.dimmed());
    print_table(&session, color);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{} ", ">".cyan().bold());
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let input = line.trim();

        match input.to_ascii_lowercase().as_str() {
            "" => continue,
            "q" | "quit" | "exit" => break,
            "h" | "help" => {
                println!("{}", HELP);
                continue;
            }
            "r" | "restart" => {
                session.restart(rand::random());
                print_table(&session, color);
                continue;
            }
            "s" | "save" => {
                save(&session, &args.save_file)?;
                println!("saved to {}", args.save_file.display());
                continue;
            }
            _ => {}
        }

        if session.result().is_some() {
            println!("The game is over. Type restart or quit.");
            continue;
        }

        let board = &session.state().board;
        let id = match parse_coordinate(input, board.columns(), board.rows()) {
            Ok((column, row)) => board.id_at(column, row),
            Err(err) => {
                println!("{}", err.to_string().red());
                continue;
            }
        };
        let Some(id) = id else {
            continue;
        };

        if let Err(err) = session.flip(id) {
            println!("{}", err.to_string().red());
            continue;
        }

        if !session.state().awaiting_resolution() {
            print_table(&session, color);
            continue;
        }

        // Show both cards before the turn resolves.
        print_table(&session, color);
        thread::sleep(delay);

        match session.resolve()? {
            TurnOutcome::Match { .. } => println!("{}", "Match!".green().bold()),
            TurnOutcome::Mismatch { .. } => println!("{}", "No match.".yellow()),
        }
        print_table(&session, color);
    }

    Ok(())
}

fn print_table(session: &Session<JsonFileStore>, color: bool) {
    println!();
    print!("{}", render_board(&session.state().board, color));
    println!();

    let hud = session.hud();
    println!(
        "{}   {}   {}",
        hud.score_text(),
        hud.attempts_text(),
        hud.high_score_text()
    );
    match session.result() {
        Some(result) if result.is_win() => {
            println!("{}", hud.banner().unwrap_or_default().green().bold());
        }
        Some(_) => println!("{}", hud.banner().unwrap_or_default().red().bold()),
        None => {}
    }
}

fn save(session: &Session<JsonFileStore>, path: &Path) -> anyhow::Result<()> {
    let bytes = session.save().to_bytes()?;
    std::fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
