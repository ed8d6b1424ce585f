use serde::{Deserialize, Serialize};

/// A square coordinate. Whether it lies on the board is the board's call,
/// see [`crate::board::Board::is_legal_position`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Held by every piece that is not on a board.
    pub const OFF_BOARD: Position = Position { x: -1, y: -1 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_off_board(self) -> bool {
        self == Self::OFF_BOARD
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::OFF_BOARD
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Position::new(x, y)
    }
}
