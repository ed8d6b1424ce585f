use std::rc::Rc;

use pawnboard::{Board, ChessPiece, Color, MovementType, Pawn, BOARD_WIDTH};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEFAULT_STEPS: u32 = 200;

struct Args {
    seed: Option<u64>,
    steps: u32,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        seed: None,
        steps: DEFAULT_STEPS,
    };
    let mut it = std::env::args().skip(1);
    while let Some(flag) = it.next() {
        let value = it.next().ok_or_else(|| format!("{flag} needs a value"))?;
        match flag.as_str() {
            "--seed" => args.seed = Some(value.parse().map_err(|e| format!("--seed: {e}"))?),
            "--steps" => args.steps = value.parse().map_err(|e| format!("--steps: {e}"))?,
            _ => return Err(format!("unknown flag {flag}")),
        }
    }
    Ok(args)
}

/// Pick a pawn and a target square one step ahead of it (sometimes two),
/// straight or diagonal, and ask for the move.
fn random_request(rng: &mut StdRng, pawn: &Pawn, positive: Color) -> (MovementType, i32, i32) {
    let forward = if pawn.color() == positive { 1 } else { -1 };
    let steps = if rng.gen_bool(0.2) { 2 } else { 1 };
    let dx = [-1, 0, 1][rng.gen_range(0..3)];
    let movement = if dx == 0 {
        MovementType::Move
    } else {
        MovementType::Capture
    };
    (movement, pawn.x() + dx, pawn.y() + forward * steps)
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("usage: skirmish [--seed N] [--steps N]");
            std::process::exit(2);
        }
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    tracing::info!(seed, steps = args.steps, built = env!("BUILD_TIMESTAMP"), "starting skirmish");

    let board = Board::new();
    let mut pawns: Vec<Rc<Pawn>> = Vec::new();
    for x in 0..BOARD_WIDTH {
        for (color, y) in [(Color::White, 1), (Color::Black, 6)] {
            let pawn = Rc::new(Pawn::new(color));
            if board.add(pawn.clone(), x, y) {
                pawns.push(pawn);
            }
        }
    }

    let mut applied = 0u32;
    for _ in 0..args.steps {
        let live: Vec<&Rc<Pawn>> = pawns.iter().filter(|p| board.contains(&***p)).collect();
        let Some(pawn) = live.choose(&mut rng) else {
            break;
        };
        let (movement, x, y) = random_request(&mut rng, pawn, board.positive_direction_color());
        if pawn.move_to(movement, x, y) {
            applied += 1;
            tracing::info!(pawn = %pawn, %movement, "applied");
        }
    }

    tracing::info!(
        applied,
        white_left = board.count_pieces(pawnboard::PieceType::Pawn, Color::White),
        black_left = board.count_pieces(pawnboard::PieceType::Pawn, Color::Black),
        "skirmish finished"
    );

    match board.snapshot().to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!(error = %e, "could not serialize the final board");
            std::process::exit(1);
        }
    }
}
