use std::cell::Cell;
use std::fmt;

use crate::board::BOARD_WIDTH;
use crate::piece::{ChessPiece, Color, MovementType, PieceCore, PieceType};

/// A pawn: straight ahead onto empty squares, one square diagonally forward
/// to capture, two squares ahead allowed on its first move only.
///
/// "Forward" depends on the board. A pawn of the board's positive-direction
/// color goes up in `y`; the other color goes down.
#[derive(Debug)]
pub struct Pawn {
    core: PieceCore,
    first_move: Cell<bool>,
}

impl Pawn {
    /// One rank's worth per color.
    pub const MAX_INSTANCES: usize = BOARD_WIDTH as usize;

    pub fn new(color: Color) -> Self {
        Self::with_first_move(color, true)
    }

    /// A pawn that may or may not still have its double step available.
    pub fn with_first_move(color: Color, first_move: bool) -> Self {
        Pawn {
            core: PieceCore::new(color),
            first_move: Cell::new(first_move),
        }
    }

    pub fn is_first_move(&self) -> bool {
        self.first_move.get()
    }
}

impl ChessPiece for Pawn {
    fn core(&self) -> &PieceCore {
        &self.core
    }

    fn piece_type(&self) -> PieceType {
        PieceType::Pawn
    }

    fn max_instances(&self) -> Option<usize> {
        Some(Self::MAX_INSTANCES)
    }

    fn is_move_legal(&self, movement: MovementType, new_x: i32, new_y: i32) -> bool {
        let Some(positive) = self.core.positive_direction_color() else {
            return false;
        };
        let direction: i64 = if positive == self.color() { 1 } else { -1 };
        let current = self.position();
        // Widened so any pair of i32 coordinates is comparable.
        let forward = (i64::from(new_y) - i64::from(current.y)) * direction;
        let sideways = i64::from(new_x) - i64::from(current.x);

        match movement {
            MovementType::Move => {
                let max_forward = if self.first_move.get() { 2 } else { 1 };
                sideways == 0 && forward > 0 && forward <= max_forward
            }
            MovementType::Capture => sideways.abs() == 1 && forward == 1,
        }
    }

    fn on_moved(&self) {
        self.first_move.set(false);
    }
}

impl fmt::Display for Pawn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pos = self.position();
        write!(
            f,
            "{} {} (x: {}, y: {})",
            self.color(),
            self.piece_type(),
            pos.x,
            pos.y
        )
    }
}
