use std::rc::Rc;

use pawnboard::{Board, ChessPiece, Color, Pawn, PieceType, Position, BOARD_HEIGHT, BOARD_WIDTH};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn assert_position(piece: &dyn ChessPiece, x: i32, y: i32) {
    assert_eq!(piece.x(), x);
    assert_eq!(piece.y(), y);
}

fn assert_off_board(piece: &dyn ChessPiece) {
    assert_eq!(piece.position(), Position::OFF_BOARD);
    assert_position(piece, -1, -1);
}

#[test]
fn board_is_eight_by_eight() {
    assert_eq!(BOARD_WIDTH, 8);
    assert_eq!(BOARD_HEIGHT, 8);
}

#[test]
fn legal_positions() {
    let board = Board::new();
    for (x, y) in [(0, 0), (5, 5), (7, 7), (0, 7), (7, 0)] {
        assert!(board.is_legal_position(x, y), "({x}, {y}) should be legal");
    }
    for (x, y) in [(11, 5), (0, 9), (11, 0), (5, -1), (-1, 5), (7, 8), (8, 7), (8, 8)] {
        assert!(!board.is_legal_position(x, y), "({x}, {y}) should be illegal");
    }
}

#[test]
fn legal_position_matches_bounds_everywhere() {
    let board = Board::new();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..2_000 {
        let x = rng.gen_range(-20..20);
        let y = rng.gen_range(-20..20);
        let in_bounds = (0..BOARD_WIDTH).contains(&x) && (0..BOARD_HEIGHT).contains(&y);
        assert_eq!(board.is_legal_position(x, y), in_bounds, "({x}, {y})");
    }
}

#[test]
fn default_board_moves_white_up() {
    assert_eq!(Board::new().positive_direction_color(), Color::White);
    assert_eq!(
        Board::with_positive_direction(Color::Black).positive_direction_color(),
        Color::Black
    );
}

#[test]
fn add_sets_coordinates() {
    let board = Board::new();
    let pawn = Rc::new(Pawn::new(Color::Black));
    assert!(board.add(pawn.clone(), 6, 3));
    assert_position(&*pawn, 6, 3);
    assert!(board.contains(&*pawn));
    assert!(pawn.is_at(6, 3));
    assert!(!pawn.is_at(3, 6));
}

#[test]
fn avoids_duplicate_positioning() {
    let board = Board::new();
    let first = Rc::new(Pawn::new(Color::Black));
    let second = Rc::new(Pawn::new(Color::Black));
    assert!(board.add(first.clone(), 6, 3));
    assert!(!board.add(second.clone(), 6, 3));
    assert_position(&*first, 6, 3);
    assert_off_board(&*second);
    assert!(!board.contains(&*second));
}

#[test]
fn adding_the_same_piece_twice_fails() {
    let board = Board::new();
    let pawn = Rc::new(Pawn::new(Color::White));
    assert!(board.add(pawn.clone(), 0, 0));
    assert!(!board.add(pawn.clone(), 0, 1));
    assert_position(&*pawn, 0, 0);
    assert_eq!(board.pieces().len(), 1);
}

#[test]
fn add_rejects_invalid_coordinates() {
    let board = Board::new();
    let pawn = Rc::new(Pawn::new(Color::White));
    for (x, y) in [(8, 8), (-1, -1), (-1, 0), (0, -1), (7, 8), (8, 7)] {
        assert!(!board.add(pawn.clone(), x, y), "({x}, {y})");
        assert_off_board(&*pawn);
    }
    assert!(!board.contains(&*pawn));
}

#[test]
fn limits_the_number_of_pawns() {
    let board = Board::new();
    for i in 0..10 {
        let pawn = Rc::new(Pawn::new(Color::Black));
        let row = i / BOARD_WIDTH;
        let col = i % BOARD_WIDTH;
        if row < 1 {
            assert!(board.add(pawn.clone(), 6 + row, col));
            assert_position(&*pawn, 6 + row, col);
        } else {
            assert!(!board.add(pawn.clone(), 6 + row, col));
            assert_off_board(&*pawn);
        }
    }
    assert_eq!(board.count_pieces(PieceType::Pawn, Color::Black), 8);

    // The other color has its own limit.
    let white = Rc::new(Pawn::new(Color::White));
    assert!(board.add(white, 0, 0));
    assert_eq!(board.count_pieces(PieceType::Pawn, Color::White), 1);
}

#[test]
fn removing_frees_an_instance_slot() {
    let board = Board::new();
    let pawns: Vec<Rc<Pawn>> = (0..BOARD_WIDTH)
        .map(|x| {
            let pawn = Rc::new(Pawn::new(Color::White));
            assert!(board.add(pawn.clone(), x, 1));
            pawn
        })
        .collect();
    let extra = Rc::new(Pawn::new(Color::White));
    assert!(!board.add(extra.clone(), 0, 2));

    assert!(board.remove_piece(&*pawns[0]));
    assert!(board.add(extra.clone(), 0, 2));
}

#[test]
fn add_onto_occupied_square_fails() {
    let board = Board::new();
    let pawn1 = Rc::new(Pawn::new(Color::White));
    let pawn2 = Rc::new(Pawn::new(Color::White));
    assert!(board.add(pawn1.clone(), 0, 0));
    assert!(!board.add(pawn2.clone(), 0, 0));
    assert!(!board.contains(&*pawn2));
    assert_off_board(&*pawn2);
}

#[test]
fn add_never_captures() {
    let board = Board::new();
    let white = Rc::new(Pawn::new(Color::White));
    let black = Rc::new(Pawn::new(Color::Black));
    assert!(board.add(white.clone(), 4, 4));
    assert!(!board.add(black.clone(), 4, 4));
    assert!(board.contains(&*white));
    assert!(board.captured(Color::Black).is_empty());
}

#[test]
fn remove() {
    let board = Board::new();
    let pawn = Rc::new(Pawn::new(Color::White));
    assert!(board.add(pawn.clone(), 0, 0));
    assert!(board.remove_piece(&*pawn));
    assert!(!board.contains(&*pawn));
    assert_off_board(&*pawn);
    assert!(board.piece_at(0, 0).is_none());
}

#[test]
fn remove_not_added() {
    let board = Board::new();
    let placed = Rc::new(Pawn::new(Color::Black));
    assert!(board.add(placed.clone(), 3, 6));

    let pawn = Pawn::new(Color::White);
    assert!(!board.remove_piece(&pawn));
    assert_off_board(&pawn);
    assert!(board.contains(&*placed));
    assert_position(&*placed, 3, 6);
}

#[test]
fn piece_at_finds_the_occupant() {
    let board = Board::new();
    let pawn = Rc::new(Pawn::new(Color::White));
    assert!(board.add(pawn.clone(), 2, 5));
    let found = board.piece_at(2, 5).expect("occupied");
    assert_eq!(found.id(), pawn.id());
    assert!(board.piece_at(5, 2).is_none());
    assert!(board.piece_at(-1, -1).is_none());
}

#[test]
fn membership_is_by_identity() {
    let board = Board::new();
    let placed = Rc::new(Pawn::new(Color::White));
    let lookalike = Pawn::new(Color::White);
    assert!(board.add(placed.clone(), 1, 1));
    assert!(board.contains(&*placed));
    assert!(!board.contains(&lookalike));
}

#[test]
fn piece_on_one_board_cannot_be_added_to_another() {
    let first = Board::new();
    let second = Board::new();
    let pawn = Rc::new(Pawn::new(Color::White));
    assert!(first.add(pawn.clone(), 0, 1));
    assert!(!second.add(pawn.clone(), 4, 1));
    assert!(!second.contains(&*pawn));
    assert_position(&*pawn, 0, 1);

    assert!(first.remove_piece(&*pawn));
    assert!(second.add(pawn.clone(), 4, 1));
    assert_position(&*pawn, 4, 1);
}

#[test]
fn pieces_are_released_when_their_board_is_dropped() {
    let white = Rc::new(Pawn::new(Color::White));
    let black = Rc::new(Pawn::new(Color::Black));
    {
        let board = Board::new();
        assert!(board.add(white.clone(), 2, 1));
        assert!(board.add(black.clone(), 2, 6));
        assert!(board.remove_piece(&*black));
        assert!(board.add(black.clone(), 3, 6));
    }
    assert_off_board(&*white);
    assert_off_board(&*black);

    let next = Board::with_positive_direction(Color::Black);
    assert!(next.add(white.clone(), 2, 6));
    assert!(next.add(black.clone(), 3, 1));
    assert!(next.contains(&*white));
    assert!(next.contains(&*black));
    assert_eq!(next.count_pieces(PieceType::Pawn, Color::White), 1);
}
