use std::cell::RefCell;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use crate::error::Rejection;
use crate::piece::{BoardAccess, ChessPiece, Color, MovementType, PieceRef, PieceType};
use crate::position::Position;

pub const BOARD_WIDTH: i32 = 8;
pub const BOARD_HEIGHT: i32 = 8;

/// Construction options for a [`Board`].
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct BoardConfig {
    /// The color whose pieces advance along increasing `y`. The other color
    /// advances along decreasing `y`.
    pub positive_direction: Color,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardConfig {
    pub fn new() -> Self {
        BoardConfig {
            positive_direction: Color::White,
        }
    }
}

/// Serializable view of a board, e.g. for printing a position as JSON.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub width: i32,
    pub height: i32,
    pub positive_direction: Color,
    /// Active pieces in the order they were placed.
    pub pieces: Vec<PieceView>,
    pub captured_by_white: Vec<PieceView>,
    pub captured_by_black: Vec<PieceView>,
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct PieceView {
    pub piece_type: PieceType,
    pub color: Color,
    pub x: i32,
    pub y: i32,
}

impl PieceView {
    fn of(piece: &dyn ChessPiece) -> Self {
        let pos = piece.position();
        PieceView {
            piece_type: piece.piece_type(),
            color: piece.color(),
            x: pos.x,
            y: pos.y,
        }
    }
}

fn views(pieces: &[PieceRef]) -> Vec<PieceView> {
    pieces.iter().map(|p| PieceView::of(&**p)).collect()
}

impl BoardSnapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Pieces on the board and the pieces each color has captured.
#[derive(Default)]
struct Occupancy {
    pieces: Vec<PieceRef>,
    captured: [Vec<PieceRef>; 2],
}

impl Occupancy {
    fn contains(&self, piece: &dyn ChessPiece) -> bool {
        let id = piece.id();
        self.pieces.iter().any(|p| p.id() == id)
    }

    fn piece_at(&self, x: i32, y: i32) -> Option<&PieceRef> {
        self.pieces.iter().find(|p| p.is_at(x, y))
    }

    fn count(&self, piece_type: PieceType, color: Color) -> usize {
        self.pieces
            .iter()
            .filter(|p| p.piece_type() == piece_type && p.color() == color)
            .count()
    }

    fn take(&mut self, piece: &dyn ChessPiece) -> Option<PieceRef> {
        let id = piece.id();
        let idx = self.pieces.iter().position(|p| p.id() == id)?;
        let taken = self.pieces.remove(idx);
        taken.core().set_position(Position::OFF_BOARD);
        Some(taken)
    }

    /// Validate a move of `piece` and apply it only if every check passes.
    fn apply_move(
        &mut self,
        piece: &dyn ChessPiece,
        movement: MovementType,
        new_x: i32,
        new_y: i32,
    ) -> Result<(), Rejection> {
        if !self.contains(piece) {
            return Err(Rejection::NotOnBoard);
        }
        if !is_legal_position(new_x, new_y) {
            return Err(Rejection::IllegalPosition { x: new_x, y: new_y });
        }
        let target = self.piece_at(new_x, new_y).cloned();
        if !occupancy_allows(movement, piece, target.as_deref()) {
            return Err(Rejection::OccupancyMismatch {
                movement,
                x: new_x,
                y: new_y,
            });
        }
        if !piece.is_move_legal(movement, new_x, new_y) {
            return Err(Rejection::IllegalForPiece {
                piece_type: piece.piece_type(),
                movement,
                x: new_x,
                y: new_y,
            });
        }

        if let Some(target) = target {
            if let Some(captured) = self.take(&*target) {
                self.captured[piece.color().index()].push(captured);
            }
        }
        piece.core().set_position(Position::new(new_x, new_y));
        Ok(())
    }
}

/// A move needs an empty target; a capture needs one held by the other color.
fn occupancy_allows(
    movement: MovementType,
    piece: &dyn ChessPiece,
    target: Option<&dyn ChessPiece>,
) -> bool {
    match (movement, target) {
        (MovementType::Move, None) => true,
        (MovementType::Move, Some(_)) => false,
        (MovementType::Capture, None) => false,
        (MovementType::Capture, Some(target)) => target.color() != piece.color(),
    }
}

fn is_legal_position(x: i32, y: i32) -> bool {
    (0..BOARD_WIDTH).contains(&x) && (0..BOARD_HEIGHT).contains(&y)
}

/// What a piece gets handed when it is added: the board's direction and a
/// way to request moves, nothing more.
struct BoardRef {
    positive_direction: Color,
    occupancy: Weak<RefCell<Occupancy>>,
}

impl BoardAccess for BoardRef {
    fn positive_direction_color(&self) -> Color {
        self.positive_direction
    }

    fn request_move(
        &self,
        piece: &dyn ChessPiece,
        movement: MovementType,
        new_x: i32,
        new_y: i32,
    ) -> Result<(), Rejection> {
        let occupancy = self.occupancy.upgrade().ok_or(Rejection::BoardDropped)?;
        let mut occupancy = occupancy.try_borrow_mut().map_err(|_| Rejection::Busy)?;
        let from = piece.position();
        match occupancy.apply_move(piece, movement, new_x, new_y) {
            Ok(()) => {
                tracing::trace!(
                    piece = %piece.piece_type(),
                    color = %piece.color(),
                    %movement,
                    from_x = from.x,
                    from_y = from.y,
                    x = new_x,
                    y = new_y,
                    "move applied"
                );
                Ok(())
            }
            Err(reason) => {
                tracing::debug!(
                    piece = %piece.piece_type(),
                    color = %piece.color(),
                    %movement,
                    x = new_x,
                    y = new_y,
                    %reason,
                    "move rejected"
                );
                Err(reason)
            }
        }
    }
}

/// An 8x8 board: the only authority on where pieces stand.
///
/// Pieces are placed with [`Board::add`] and then moved through their own
/// [`ChessPiece::move_to`], which comes back here for validation. There is no
/// way to move a piece on the board's behalf.
pub struct Board {
    occupancy: Rc<RefCell<Occupancy>>,
    access: Rc<BoardRef>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Pieces still on the board go back off-board with it.
impl Drop for Board {
    fn drop(&mut self) {
        if let Ok(occupancy) = self.occupancy.try_borrow() {
            for piece in &occupancy.pieces {
                piece.core().set_position(Position::OFF_BOARD);
            }
        }
    }
}

impl Board {
    pub const WIDTH: i32 = BOARD_WIDTH;
    pub const HEIGHT: i32 = BOARD_HEIGHT;

    /// An empty board on which White moves up.
    pub fn new() -> Self {
        Self::with_config(BoardConfig::new())
    }

    pub fn with_positive_direction(color: Color) -> Self {
        Self::with_config(BoardConfig {
            positive_direction: color,
        })
    }

    pub fn with_config(config: BoardConfig) -> Self {
        let occupancy = Rc::new(RefCell::new(Occupancy::default()));
        let access = Rc::new(BoardRef {
            positive_direction: config.positive_direction,
            occupancy: Rc::downgrade(&occupancy),
        });
        Board { occupancy, access }
    }

    pub fn config(&self) -> BoardConfig {
        BoardConfig {
            positive_direction: self.positive_direction_color(),
        }
    }

    pub fn positive_direction_color(&self) -> Color {
        self.access.positive_direction
    }

    pub fn is_legal_position(&self, x: i32, y: i32) -> bool {
        is_legal_position(x, y)
    }

    /// Place `piece` on an empty square, telling why if it can't be placed.
    pub fn try_add(&self, piece: PieceRef, x: i32, y: i32) -> Result<(), Rejection> {
        let result = self.place(piece.clone(), x, y);
        match &result {
            Ok(()) => tracing::trace!(
                piece = %piece.piece_type(),
                color = %piece.color(),
                x,
                y,
                "piece added"
            ),
            Err(reason) => tracing::debug!(
                piece = %piece.piece_type(),
                color = %piece.color(),
                x,
                y,
                %reason,
                "add rejected"
            ),
        }
        result
    }

    /// Place `piece` on an empty square.
    ///
    /// Fails if the piece is already on a board, if its type and color are at
    /// their instance limit, if `(x, y)` is off the board, or if the square
    /// is taken. Nothing changes on failure.
    pub fn add(&self, piece: PieceRef, x: i32, y: i32) -> bool {
        self.try_add(piece, x, y).is_ok()
    }

    fn place(&self, piece: PieceRef, x: i32, y: i32) -> Result<(), Rejection> {
        let mut occupancy = self.occupancy.try_borrow_mut().map_err(|_| Rejection::Busy)?;

        // A placed piece is on this board or another one.
        if occupancy.contains(&*piece) || !piece.position().is_off_board() {
            return Err(Rejection::AlreadyOnBoard);
        }
        if let Some(limit) = piece.max_instances() {
            if occupancy.count(piece.piece_type(), piece.color()) >= limit {
                return Err(Rejection::InstanceLimit {
                    piece_type: piece.piece_type(),
                    color: piece.color(),
                    limit,
                });
            }
        }
        if !is_legal_position(x, y) {
            return Err(Rejection::IllegalPosition { x, y });
        }
        if !occupancy_allows(MovementType::Move, &*piece, occupancy.piece_at(x, y).map(|p| &**p)) {
            return Err(Rejection::Occupied { x, y });
        }

        piece.core().grant(self.access.clone());
        piece.core().set_position(Position::new(x, y));
        occupancy.pieces.push(piece);
        Ok(())
    }

    /// Take `piece` off the board without capturing it.
    pub fn try_remove_piece(&self, piece: &dyn ChessPiece) -> Result<(), Rejection> {
        let mut occupancy = self.occupancy.try_borrow_mut().map_err(|_| Rejection::Busy)?;
        match occupancy.take(piece) {
            Some(_) => {
                tracing::trace!(piece = %piece.piece_type(), color = %piece.color(), "piece removed");
                Ok(())
            }
            None => {
                tracing::debug!(
                    piece = %piece.piece_type(),
                    color = %piece.color(),
                    reason = %Rejection::NotOnBoard,
                    "remove rejected"
                );
                Err(Rejection::NotOnBoard)
            }
        }
    }

    /// Take `piece` off the board. Its position goes back to
    /// [`Position::OFF_BOARD`]; it is not counted as captured.
    pub fn remove_piece(&self, piece: &dyn ChessPiece) -> bool {
        self.try_remove_piece(piece).is_ok()
    }

    pub fn contains(&self, piece: &dyn ChessPiece) -> bool {
        self.occupancy.borrow().contains(piece)
    }

    pub fn piece_at(&self, x: i32, y: i32) -> Option<PieceRef> {
        self.occupancy.borrow().piece_at(x, y).cloned()
    }

    pub fn count_pieces(&self, piece_type: PieceType, color: Color) -> usize {
        self.occupancy.borrow().count(piece_type, color)
    }

    /// Active pieces in placement order.
    pub fn pieces(&self) -> Vec<PieceRef> {
        self.occupancy.borrow().pieces.clone()
    }

    /// Pieces captured by `color`, oldest first.
    pub fn captured(&self, color: Color) -> Vec<PieceRef> {
        self.occupancy.borrow().captured[color.index()].clone()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        let occupancy = self.occupancy.borrow();
        BoardSnapshot {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            positive_direction: self.positive_direction_color(),
            pieces: views(&occupancy.pieces),
            captured_by_white: views(&occupancy.captured[Color::White.index()]),
            captured_by_black: views(&occupancy.captured[Color::Black.index()]),
        }
    }
}
