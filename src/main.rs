use clap::{Parser, Subcommand};
use mtg_duel::card::registry::{demo_set, CardSet};
use mtg_duel::card::types::{CardDefinition, PlayerId};
use mtg_duel::game::actions::Action;
use mtg_duel::game::state::Game;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "mtg-duel")]
#[command(about = "Deterministic two-player card duel engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a short scripted demo game and print the final state as JSON
    Demo {
        /// Seed for library shuffling (for reproducibility)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print the state after every action instead of only the final one
        #[arg(short, long)]
        verbose: bool,
    },

    /// Load a card set file, validate it, and list the cards
    Cards {
        /// Path to a JSON card set file; the built-in demo set when omitted
        #[arg(short, long)]
        file: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Commands::Demo { seed, verbose } => run_demo(seed, verbose),
        Commands::Cards { file } => run_cards(file),
    }
}

/// A small two-color deck from the demo set.
fn demo_deck(set: &CardSet) -> Vec<Arc<CardDefinition>> {
    let mut deck = Vec::new();
    for _ in 0..8 {
        deck.push(set.get_by_name("Mountain").unwrap());
    }
    for _ in 0..8 {
        deck.push(set.get_by_name("Forest").unwrap());
    }
    for _ in 0..4 {
        deck.push(set.get_by_name("Bear Cub").unwrap());
    }
    for _ in 0..4 {
        deck.push(set.get_by_name("Rush Goblin").unwrap());
    }
    for _ in 0..4 {
        deck.push(set.get_by_name("Lightning Jolt").unwrap());
    }
    deck
}

fn run_demo(seed: Option<u64>, verbose: bool) {
    let set = demo_set();
    let mut game = Game::new(demo_deck(&set), demo_deck(&set), seed);

    // Each player plays the first land in hand (if any) during their main
    // phase, then ends the turn; four turns total.
    let mut script: Vec<Action> = Vec::new();
    for turn in 0..4u8 {
        let player = PlayerId(turn % 2);
        for _ in 0..4 {
            script.push(Action::AdvanceStep { player });
        }
        script.push(Action::EndTurn { player });
    }

    for action in &script {
        let mut acted = action.clone();
        // Swap a step advance for a land drop when one is legal.
        if let Action::AdvanceStep { player } = action {
            let state = &game.players[player.index()];
            if state.lands_played_this_turn == 0 && game.turn.step.is_main() {
                if let Some(land) = state.hand.cards().iter().find(|c| c.definition.is_land()) {
                    acted = Action::PlayLand {
                        player: *player,
                        card: land.id,
                    };
                }
            }
        }
        match game.apply(&acted) {
            Ok(()) => {
                if verbose {
                    println!("{}", serde_json::to_string(&game.export()).unwrap());
                }
            }
            Err(err) => eprintln!("rejected {:?}: {}", acted.kind(), err),
        }
        if game.is_finished() {
            break;
        }
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&game.export()).unwrap()
    );
}

fn run_cards(file: Option<String>) {
    let set = match file {
        Some(path) => match CardSet::from_file(&path) {
            Ok(set) => set,
            Err(err) => {
                eprintln!("failed to load card set: {}", err);
                std::process::exit(1);
            }
        },
        None => demo_set(),
    };
    println!("{} cards:", set.card_count());
    for name in set.card_names() {
        println!("  {}", name);
    }
}
