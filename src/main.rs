//! herodeck - Main Binary
//!
//! Bot-vs-bot games and tournaments from the command line

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use herodeck::{
    core::{PlayerId, RulesConfig},
    game::{GameLogger, GameLoop, OutputFormat, VerbosityLevel},
    loader::{DeckLoader, EquipmentDeck, GameInitializer, GameSetup, HeroDeck},
    tournament::{run_tourney, ControllerType, TourneyConfig},
};
use std::path::{Path, PathBuf};

/// Verbosity level for game output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

#[derive(Parser)]
#[command(name = "herodeck")]
#[command(about = "herodeck - hero card battler engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one bot-vs-bot game
    Play {
        /// Hero deck (.json) for the Player seat
        #[arg(value_name = "PLAYER_DECK")]
        player_deck: PathBuf,

        /// Hero deck (.json) for the AI seat
        #[arg(value_name = "AI_DECK")]
        ai_deck: PathBuf,

        /// Equipment deck (.json) for the shop
        #[arg(long, default_value = "decks/shop.json")]
        shop: PathBuf,

        /// Player seat controller type
        #[arg(long, value_enum, default_value = "greedy")]
        player: ControllerType,

        /// AI seat controller type
        #[arg(long, value_enum, default_value = "greedy")]
        ai: ControllerType,

        /// Set random seed for deterministic games
        #[arg(long)]
        seed: Option<u64>,

        /// Rules file (.json); missing fields use the standard rules
        #[arg(long, value_name = "RULES_FILE")]
        rules: Option<PathBuf>,

        /// Maximum turns before the game is called a draw
        #[arg(long, default_value_t = 200)]
        max_turns: u32,

        /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,

        /// Print log lines as JSON objects
        #[arg(long)]
        json: bool,
    },

    /// Run many games in parallel and report win rates
    Tourney {
        /// Hero decks (.json) to pair at random
        #[arg(value_name = "DECKS", required = true, num_args = 1..)]
        decks: Vec<PathBuf>,

        /// Equipment deck (.json) for the shop
        #[arg(long, default_value = "decks/shop.json")]
        shop: PathBuf,

        /// Number of games to play
        #[arg(long, short = 'n', default_value_t = 100)]
        games: usize,

        /// Tournament seed
        #[arg(long, default_value_t = 0)]
        seed: u64,

        #[arg(long, value_enum, default_value = "greedy")]
        player: ControllerType,

        #[arg(long, value_enum, default_value = "greedy")]
        ai: ControllerType,

        #[arg(long, value_name = "RULES_FILE")]
        rules: Option<PathBuf>,

        #[arg(long, default_value_t = 200)]
        max_turns: u32,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            player_deck,
            ai_deck,
            shop,
            player,
            ai,
            seed,
            rules,
            max_turns,
            verbosity,
            json,
        } => run_play(PlayArgs {
            player_deck,
            ai_deck,
            shop,
            player,
            ai,
            seed,
            rules,
            max_turns,
            verbosity: verbosity.into(),
            json,
        })?,
        Commands::Tourney {
            decks,
            shop,
            games,
            seed,
            player,
            ai,
            rules,
            max_turns,
            json,
        } => {
            let config = TourneyConfig {
                games,
                seed,
                player,
                ai,
                max_turns,
                rules: load_rules(rules.as_deref())?,
            };
            run_tourney_cmd(&decks, &shop, &config, json)?
        }
    }

    Ok(())
}

struct PlayArgs {
    player_deck: PathBuf,
    ai_deck: PathBuf,
    shop: PathBuf,
    player: ControllerType,
    ai: ControllerType,
    seed: Option<u64>,
    rules: Option<PathBuf>,
    max_turns: u32,
    verbosity: VerbosityLevel,
    json: bool,
}

fn load_rules(path: Option<&Path>) -> Result<RulesConfig> {
    match path {
        Some(path) => RulesConfig::load_from_file(path)
            .with_context(|| format!("failed to load rules from {}", path.display())),
        None => Ok(RulesConfig::default()),
    }
}

fn load_hero_deck(path: &Path) -> Result<HeroDeck> {
    DeckLoader::load_hero_deck(path).with_context(|| format!("failed to load deck {}", path.display()))
}

fn load_shop(path: &Path) -> Result<EquipmentDeck> {
    DeckLoader::load_equipment(path).with_context(|| format!("failed to load shop {}", path.display()))
}

fn run_play(args: PlayArgs) -> Result<()> {
    let rules = load_rules(args.rules.as_deref())?;
    let player_deck = load_hero_deck(&args.player_deck)?;
    let ai_deck = load_hero_deck(&args.ai_deck)?;
    let shop = load_shop(&args.shop)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    let setup = GameSetup::from_decks(&player_deck, &ai_deck, &shop)?;
    let game = GameInitializer::new(rules).init_game(&setup, seed)?;

    let mut logger = GameLogger::with_verbosity(args.verbosity);
    if args.json {
        logger.set_output_format(OutputFormat::Json);
    }
    if args.verbosity >= VerbosityLevel::Normal && !args.json {
        println!("=== herodeck ===");
        println!("Seed: {seed}");
        println!("Player: {} ({})", player_deck.name, setup.player.hero);
        println!("AI: {} ({})", ai_deck.name, setup.ai.hero);
        println!();
    }

    let mut player = args.player.build(PlayerId::Player);
    let mut ai = args.ai.build(PlayerId::Ai);
    let game_loop = GameLoop::new().with_max_turns(args.max_turns).with_logger(logger);
    game_loop.run_game(game, player.as_mut(), ai.as_mut())?;

    Ok(())
}

fn run_tourney_cmd(deck_paths: &[PathBuf], shop_path: &Path, config: &TourneyConfig, json: bool) -> Result<()> {
    let decks = deck_paths
        .iter()
        .map(|path| load_hero_deck(path))
        .collect::<Result<Vec<_>>>()?;
    let shop = load_shop(shop_path)?;

    if !json {
        println!("=== herodeck - Tournament Mode ===");
        for (path, deck) in deck_paths.iter().zip(&decks) {
            println!("  {}: {} ({} cards)", path.display(), deck.name, deck.total_cards());
        }
        println!("Running {} games, seed {}\n", config.games, config.seed);
    }

    let report = run_tourney(&decks, &shop, config)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}
