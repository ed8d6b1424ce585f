//! A chessboard that enforces geometry and occupancy, and pieces that enforce
//! their own movement rules.
//!
//! The board and a piece authorise each other: the board decides where a
//! piece may stand, the piece decides how it may move, and a move only
//! happens when both agree. Moves are always requested through the piece.
//!
//! ```
//! use std::rc::Rc;
//! use pawnboard::{Board, ChessPiece, Color, MovementType, Pawn};
//!
//! let board = Board::new();
//! let black = Rc::new(Pawn::new(Color::Black));
//! assert!(board.add(black.clone(), 6, 3));
//!
//! // Nothing to capture yet.
//! assert!(!black.move_to(MovementType::Capture, 7, 2));
//!
//! let white = Rc::new(Pawn::new(Color::White));
//! assert!(board.add(white.clone(), 7, 2));
//! assert!(black.move_to(MovementType::Capture, 7, 2));
//! assert!(black.is_at(7, 2));
//! assert!(!board.contains(&*white));
//! ```

pub mod board;
pub mod error;
pub mod pawn;
pub mod piece;
pub mod position;

pub use crate::board::{Board, BoardConfig, BoardSnapshot, PieceView, BOARD_HEIGHT, BOARD_WIDTH};
pub use crate::error::Rejection;
pub use crate::pawn::Pawn;
pub use crate::piece::{
    BoardAccess, ChessPiece, Color, MovementType, PieceCore, PieceId, PieceRef, PieceType,
};
pub use crate::position::Position;
