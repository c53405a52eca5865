//! ur-selfplay - play Royal Game of Ur games between two random players.
//!
//! Every move is checked against the board invariants. With `--json` the
//! event stream of each game is written to stdout as NDJSON; logs go to
//! stderr.

use anyhow::{ensure, Result};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use royal_ur::{
    EventLog, GameConfig, GameRng, PlayerId, PlayerMap, TetrahedralDice, TurnController,
    TurnPhase,
};

#[derive(Parser)]
#[command(name = "ur-selfplay")]
#[command(about = "Play Royal Game of Ur games with a random legal-move policy", version)]
struct Cli {
    /// Number of games to play
    #[arg(short, long, default_value_t = 100)]
    games: u32,

    /// Master seed; each game gets its own forked stream
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Abandon a game after this many turns
    #[arg(long, default_value_t = 10_000)]
    max_turns: u32,

    /// Write game events to stdout as NDJSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut master = GameRng::new(cli.seed);
    let mut wins: PlayerMap<u32> = PlayerMap::with_value(0);
    let mut unfinished = 0u32;
    let mut total_turns = 0u64;

    for game in 0..cli.games {
        let dice_rng = master.fork();
        let mut policy = master.fork();
        let config = GameConfig::default().with_seed(dice_rng.seed());

        let mut controller = TurnController::with_observer(config, EventLog::new())
            .with_dice(TetrahedralDice::from_rng(dice_rng));

        let winner = play_game(&mut controller, &mut policy, cli.max_turns)?;
        total_turns += u64::from(controller.turn_number());

        match winner {
            Some(player) => {
                wins[player] += 1;
                debug!(game, %player, turns = controller.turn_number(), "game finished");
            }
            None => {
                unfinished += 1;
                warn!(game, max_turns = cli.max_turns, "game abandoned");
            }
        }

        if cli.json {
            for event in controller.observer_mut().take() {
                let line = serde_json::json!({ "game": game, "event": event });
                println!("{line}");
            }
        }
    }

    let average = if cli.games > 0 {
        total_turns as f64 / f64::from(cli.games)
    } else {
        0.0
    };

    info!(
        games = cli.games,
        a_wins = wins[PlayerId::A],
        b_wins = wins[PlayerId::B],
        unfinished,
        average_turns = average,
        "self-play complete"
    );

    Ok(())
}

/// Play one game to completion or the turn limit.
fn play_game(
    controller: &mut TurnController<EventLog>,
    policy: &mut GameRng,
    max_turns: u32,
) -> Result<Option<PlayerId>> {
    while controller.winner().is_none() && controller.turn_number() <= max_turns {
        controller.request_roll()?;
        if controller.phase() != TurnPhase::Selecting {
            continue;
        }

        let mut options: Vec<u8> = controller.selectable_pieces().into_iter().collect();
        ensure!(!options.is_empty(), "selecting with no movable piece");
        options.sort_unstable();

        let piece = options[policy.gen_range_usize(0..options.len())];
        controller.choose_piece(piece)?;
        controller.board().verify()?;
        controller.confirm_playback_complete()?;
    }

    Ok(controller.winner())
}
