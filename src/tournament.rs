//! Tournament mode for running many bot games in parallel and collecting statistics
//!
//! Every game gets its own seed derived from the tournament seed and the game
//! index, so a tournament is reproducible no matter how rayon schedules it.

use crate::core::{HeroKind, PlayerId, RulesConfig};
use crate::error::{EngineError, Result};
use crate::game::controller::PlayerController;
use crate::game::{GameEndReason, GameLoop, GreedyController, VerbosityLevel, ZeroController};
use crate::loader::{EquipmentDeck, GameInitializer, GameSetup, HeroDeck};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

/// Controller type for tournament seats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ControllerType {
    /// Greedy bot
    Greedy,
    /// Never acts or blocks
    Zero,
}

impl ControllerType {
    pub fn build(self, seat: PlayerId) -> Box<dyn PlayerController> {
        match self {
            ControllerType::Greedy => Box::new(GreedyController::new(seat)),
            ControllerType::Zero => Box::new(ZeroController::new(seat)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TourneyConfig {
    pub games: usize,
    pub seed: u64,
    /// Controller for the `Player` seat
    pub player: ControllerType,
    /// Controller for the `Ai` seat
    pub ai: ControllerType,
    pub max_turns: u32,
    pub rules: RulesConfig,
}

impl Default for TourneyConfig {
    fn default() -> Self {
        TourneyConfig {
            games: 100,
            seed: 0,
            player: ControllerType::Greedy,
            ai: ControllerType::Greedy,
            max_turns: 200,
            rules: RulesConfig::default(),
        }
    }
}

/// Wins and games for one hero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HeroRecord {
    pub games: usize,
    pub wins: usize,
}

impl HeroRecord {
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }
}

/// Aggregated tournament results
#[derive(Debug, Clone, Default, Serialize)]
pub struct TournamentReport {
    pub games: usize,
    pub player_wins: usize,
    pub ai_wins: usize,
    pub first_player_wins: usize,
    pub draws: usize,
    pub turn_limit_draws: usize,
    pub heroes: BTreeMap<HeroKind, HeroRecord>,
    pub total_turns: u64,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl TournamentReport {
    pub fn average_turns(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.total_turns as f64 / self.games as f64
        }
    }

    fn record(&mut self, game: &GameSummary) {
        self.games += 1;
        self.total_turns += u64::from(game.turns);

        match game.winner {
            Some(PlayerId::Player) => self.player_wins += 1,
            Some(PlayerId::Ai) => self.ai_wins += 1,
            None => self.draws += 1,
        }
        if game.winner.is_some() && game.winner == Some(game.first_player) {
            self.first_player_wins += 1;
        }
        if game.end_reason == GameEndReason::TurnLimit {
            self.turn_limit_draws += 1;
        }

        for (seat, hero) in [(PlayerId::Player, game.player_hero), (PlayerId::Ai, game.ai_hero)] {
            let entry = self.heroes.entry(hero).or_default();
            entry.games += 1;
            if game.winner == Some(seat) {
                entry.wins += 1;
            }
        }
    }
}

fn percent(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * part as f64 / total as f64
    }
}

impl fmt::Display for TournamentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Tournament Complete ===")?;
        writeln!(f, "Total games played: {}", self.games)?;
        writeln!(f, "Elapsed time: {:.2}s", self.elapsed.as_secs_f64())?;
        writeln!(f, "Average game length: {:.1} turns", self.average_turns())?;
        writeln!(f)?;
        writeln!(f, "=== Seat Statistics ===")?;
        writeln!(f, "Player wins: {} ({:.1}%)", self.player_wins, percent(self.player_wins, self.games))?;
        writeln!(f, "AI wins: {} ({:.1}%)", self.ai_wins, percent(self.ai_wins, self.games))?;
        writeln!(
            f,
            "First player wins: {} ({:.1}%)",
            self.first_player_wins,
            percent(self.first_player_wins, self.games)
        )?;
        writeln!(
            f,
            "Draws: {} ({:.1}%), {} by turn limit",
            self.draws,
            percent(self.draws, self.games),
            self.turn_limit_draws
        )?;
        writeln!(f)?;
        writeln!(f, "=== Hero Win Rates ===")?;
        for (hero, record) in &self.heroes {
            writeln!(
                f,
                "  {hero}: {}/{} ({:.1}%)",
                record.wins,
                record.games,
                100.0 * record.win_rate()
            )?;
        }
        Ok(())
    }
}

/// What one game contributes to the report
#[derive(Debug, Clone, Copy)]
struct GameSummary {
    winner: Option<PlayerId>,
    first_player: PlayerId,
    turns: u32,
    end_reason: GameEndReason,
    player_hero: HeroKind,
    ai_hero: HeroKind,
}

/// Seed for game `index`, spread so neighbouring games don't share streams
fn game_seed(seed: u64, index: usize) -> u64 {
    seed.wrapping_add((index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Play `config.games` games in parallel, pairing random decks from `decks`
pub fn run_tourney(decks: &[HeroDeck], shop: &EquipmentDeck, config: &TourneyConfig) -> Result<TournamentReport> {
    if decks.is_empty() {
        return Err(EngineError::InvalidConfig("tournament needs at least one deck".to_string()));
    }
    config.rules.validate()?;

    let start = Instant::now();
    let summaries = (0..config.games)
        .into_par_iter()
        .map(|index| play_one(decks, shop, config, game_seed(config.seed, index)))
        .collect::<Result<Vec<_>>>()?;

    let mut report = TournamentReport::default();
    for summary in &summaries {
        report.record(summary);
    }
    report.elapsed = start.elapsed();
    Ok(report)
}

fn play_one(decks: &[HeroDeck], shop: &EquipmentDeck, config: &TourneyConfig, seed: u64) -> Result<GameSummary> {
    let mut rng = ChaCha12Rng::seed_from_u64(seed);
    let player_deck = &decks[rng.gen_range(0..decks.len())];
    let ai_deck = &decks[rng.gen_range(0..decks.len())];

    let setup = GameSetup::from_decks(player_deck, ai_deck, shop)?;
    let game = GameInitializer::new(config.rules).init_game(&setup, seed)?;
    let first_player = game.first_player;

    let mut player = config.player.build(PlayerId::Player);
    let mut ai = config.ai.build(PlayerId::Ai);

    // The logger buffers through a RefCell and is not Sync; one loop per game
    let game_loop = GameLoop::new()
        .with_max_turns(config.max_turns)
        .with_verbosity(VerbosityLevel::Silent);
    let result = game_loop.run_game(game, player.as_mut(), ai.as_mut())?;

    Ok(GameSummary {
        winner: result.winner,
        first_player,
        turns: result.turns_played,
        end_reason: result.end_reason,
        player_hero: setup.player.hero,
        ai_hero: setup.ai.hero,
    })
}
