use crate::piece::{Color, MovementType, PieceType};

/// Why the board or a piece turned a request down.
///
/// The boolean operations (`add`, `remove_piece`, `move_to`) collapse all of
/// these into `false`; the `try_` variants hand the reason back.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("piece is already on a board")]
    AlreadyOnBoard,

    #[error("board already holds {limit} {color} {piece_type}(s)")]
    InstanceLimit {
        piece_type: PieceType,
        color: Color,
        limit: usize,
    },

    #[error("({x}, {y}) is not a position on the board")]
    IllegalPosition { x: i32, y: i32 },

    #[error("({x}, {y}) is already occupied")]
    Occupied { x: i32, y: i32 },

    #[error("piece is not on the board")]
    NotOnBoard,

    #[error("occupant of ({x}, {y}) does not allow a {movement}")]
    OccupancyMismatch {
        movement: MovementType,
        x: i32,
        y: i32,
    },

    #[error("{piece_type} cannot {movement} to ({x}, {y})")]
    IllegalForPiece {
        piece_type: PieceType,
        movement: MovementType,
        x: i32,
        y: i32,
    },

    /// The piece was never added to a board.
    #[error("piece has no board")]
    NoBoard,

    /// The board the piece was added to no longer exists.
    #[error("board has been dropped")]
    BoardDropped,

    /// A move was requested while the board was still applying another one,
    /// e.g. from inside a variant's legality check.
    #[error("board is busy with another move")]
    Busy,
}
