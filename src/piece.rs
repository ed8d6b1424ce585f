use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::Rejection;
use crate::position::Position;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Index for per-color arrays: White=0, Black=1.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// What the caller intends a move to be. The board never guesses this from
/// the occupancy of the destination.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    /// Onto an empty square.
    Move,
    /// Onto a square held by the other color.
    Capture,
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovementType::Move => write!(f, "move"),
            MovementType::Capture => write!(f, "capture"),
        }
    }
}

/// Identity of a piece variant, used for instance limits and counting.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum PieceType {
    Pawn,
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceType::Pawn => write!(f, "pawn"),
        }
    }
}

/// Unique per constructed piece. Two pawns of the same color are still two
/// different pieces.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PieceId(u64);

impl PieceId {
    fn next() -> PieceId {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        PieceId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// The part of a board a piece is allowed to see once it has been added.
///
/// Deliberately narrow: a piece can ask which color moves up the board and
/// can ask for itself to be moved. Everything else about the board, including
/// every way of mutating it, stays out of reach.
pub trait BoardAccess {
    /// The color that advances along increasing `y`.
    fn positive_direction_color(&self) -> Color;

    /// Validate and, if every check passes, apply a move of `piece`.
    fn request_move(
        &self,
        piece: &dyn ChessPiece,
        movement: MovementType,
        new_x: i32,
        new_y: i32,
    ) -> Result<(), Rejection>;
}

/// State shared by every piece variant.
///
/// Color is fixed at construction. Position and board access are only ever
/// changed by the board during `add`, `remove_piece` and moves.
pub struct PieceCore {
    id: PieceId,
    color: Color,
    position: Cell<Position>,
    board: RefCell<Option<Rc<dyn BoardAccess>>>,
}

impl PieceCore {
    pub fn new(color: Color) -> Self {
        PieceCore {
            id: PieceId::next(),
            color,
            position: Cell::new(Position::OFF_BOARD),
            board: RefCell::new(None),
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn position(&self) -> Position {
        self.position.get()
    }

    /// The positive-direction color of the board this piece was added to,
    /// or `None` if it has never been added.
    pub fn positive_direction_color(&self) -> Option<Color> {
        self.board
            .borrow()
            .as_ref()
            .map(|board| board.positive_direction_color())
    }

    pub(crate) fn set_position(&self, position: Position) {
        self.position.set(position);
    }

    pub(crate) fn grant(&self, board: Rc<dyn BoardAccess>) {
        *self.board.borrow_mut() = Some(board);
    }

    // Cloned out so the borrow is released before the board calls back in.
    fn board(&self) -> Option<Rc<dyn BoardAccess>> {
        self.board.borrow().clone()
    }
}

impl fmt::Debug for PieceCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PieceCore")
            .field("id", &self.id)
            .field("color", &self.color)
            .field("position", &self.position.get())
            .field("on_board", &self.board.borrow().is_some())
            .finish()
    }
}

/// Lets provided methods on [`ChessPiece`] hand `self` to the board as a
/// trait object.
#[doc(hidden)]
pub trait AsDynPiece {
    fn as_dyn_piece(&self) -> &dyn ChessPiece;
}

impl<T: ChessPiece> AsDynPiece for T {
    fn as_dyn_piece(&self) -> &dyn ChessPiece {
        self
    }
}

/// A piece variant.
///
/// Implementors supply their legality rule and instance limit; the board
/// handles placement, occupancy and captures for every variant alike.
pub trait ChessPiece: AsDynPiece {
    fn core(&self) -> &PieceCore;

    fn piece_type(&self) -> PieceType;

    /// Most pieces of this type and color that may be on one board at once.
    /// `None` means unlimited.
    fn max_instances(&self) -> Option<usize>;

    /// Whether this piece's own movement rules allow the move from where it
    /// currently stands. Must not change any state.
    fn is_move_legal(&self, movement: MovementType, new_x: i32, new_y: i32) -> bool;

    /// Called once after the board has applied a move requested through
    /// [`ChessPiece::try_move_to`].
    fn on_moved(&self) {}

    fn id(&self) -> PieceId {
        self.core().id()
    }

    fn color(&self) -> Color {
        self.core().color()
    }

    fn position(&self) -> Position {
        self.core().position()
    }

    fn x(&self) -> i32 {
        self.position().x
    }

    fn y(&self) -> i32 {
        self.position().y
    }

    fn is_at(&self, x: i32, y: i32) -> bool {
        self.position() == Position::new(x, y)
    }

    /// Ask the board this piece was added to for a move.
    fn try_move_to(&self, movement: MovementType, new_x: i32, new_y: i32) -> Result<(), Rejection> {
        let board = self.core().board().ok_or(Rejection::NoBoard)?;
        board.request_move(self.as_dyn_piece(), movement, new_x, new_y)?;
        self.on_moved();
        Ok(())
    }

    fn move_to(&self, movement: MovementType, new_x: i32, new_y: i32) -> bool {
        self.try_move_to(movement, new_x, new_y).is_ok()
    }
}

/// Shared handle to a piece of any variant.
pub type PieceRef = Rc<dyn ChessPiece>;
