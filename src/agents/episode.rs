//! Automated play: single episodes and batch statistics.

use serde::{Deserialize, Serialize};

use crate::core::{Action, GameRng, GameState};
use crate::error::RulesError;
use crate::rules::{GameResult, RulesEngine, TurnOutcome};

use super::policy::{Policy, PublicView};

/// Step cap for one episode; a policy that stalls ends the episode here.
pub const DEFAULT_MAX_STEPS: usize = 100_000;

/// How one automated game went.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EpisodeResult {
    /// Final result, or `None` if the policy stopped or the step cap was hit.
    pub result: Option<GameResult>,

    /// Turns resolved.
    pub turns: u32,

    /// Pairs matched.
    pub matches: u32,
}

/// Play `state` to the end with `policy`.
///
/// The policy sees every flipped symbol through `observe` and is told about
/// matched cards through `forget`.
pub fn run_episode<E, P>(
    engine: &mut E,
    state: &mut GameState,
    policy: &mut P,
    rng: &mut GameRng,
    max_steps: usize,
) -> Result<EpisodeResult, RulesError>
where
    E: RulesEngine,
    P: Policy + ?Sized,
{
    let mut turns = 0;
    let mut matches = 0;

    for _ in 0..max_steps {
        if engine.is_terminal(state).is_some() {
            break;
        }

        if state.awaiting_resolution() {
            let outcome = engine.apply_action(state, Action::Resolve)?;
            turns += 1;
            if let Some(TurnOutcome::Match { first, second, .. }) = outcome {
                matches += 1;
                policy.forget(first);
                policy.forget(second);
            }
            continue;
        }

        let view = PublicView::of(state);
        let Some(card) = policy.choose(&view, rng) else {
            tracing::warn!(policy = policy.name(), "policy had no card to flip");
            break;
        };

        engine.apply_action(state, Action::Flip(card))?;
        if let Some(flipped) = state.board.card(card) {
            policy.observe(card, flipped.symbol);
        }
    }

    Ok(EpisodeResult {
        result: engine.is_terminal(state),
        turns,
        matches,
    })
}

/// Aggregate results over many episodes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub games: u32,
    pub wins: u32,
    pub losses: u32,
    /// Episodes that ended without a result.
    pub unfinished: u32,
    pub total_score: u64,
    pub best_score: u32,
    pub total_turns: u64,
}

impl SimulationStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one episode into the totals.
    pub fn record(&mut self, episode: &EpisodeResult) {
        self.games += 1;
        self.total_turns += u64::from(episode.turns);

        match episode.result {
            Some(result) => {
                if result.is_win() {
                    self.wins += 1;
                } else {
                    self.losses += 1;
                }
                self.total_score += u64::from(result.score());
                self.best_score = self.best_score.max(result.score());
            }
            None => self.unfinished += 1,
        }
    }

    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        f64::from(self.wins) / f64::from(self.games)
    }

    #[must_use]
    pub fn mean_score(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_score as f64 / f64::from(self.games)
    }

    #[must_use]
    pub fn mean_turns(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_turns as f64 / f64::from(self.games)
    }
}

/// Play `games` fresh deals with one policy.
///
/// Game `i` is dealt from `seed + i`; `on_episode` is called after each game.
pub fn simulate<E, P>(
    engine: &mut E,
    new_state: impl Fn(&E, u64) -> GameState,
    policy: &mut P,
    games: u32,
    seed: u64,
    mut on_episode: impl FnMut(u32, &EpisodeResult),
) -> Result<SimulationStats, RulesError>
where
    E: RulesEngine,
    P: Policy + ?Sized,
{
    let mut stats = SimulationStats::new();

    for i in 0..games {
        let game_seed = seed.wrapping_add(u64::from(i));
        let mut state = new_state(&*engine, game_seed);
        let mut rng = state.rng.for_context("agent");
        policy.reset();

        let episode = run_episode(engine, &mut state, policy, &mut rng, DEFAULT_MAX_STEPS)?;
        stats.record(&episode);
        on_episode(i, &episode);
    }

    tracing::debug!(
        policy = policy.name(),
        games = stats.games,
        wins = stats.wins,
        "simulation finished"
    );
    Ok(stats)
}
