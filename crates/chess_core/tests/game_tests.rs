//! End-to-end tests for move execution through the public board API.
//!
//! Covers:
//! - Turn alternation and atomic rejection
//! - Path blocking for sliding pieces
//! - Pawn promotion
//! - King safety against a rook line
//! - A short game ending in mate

use chess_core::{Board, Color, IllegalOperation, Piece, PieceKind, Square};

fn place(board: &mut Board, row: i8, col: i8, color: Color, kind: PieceKind) {
    board.put(row, col, Some(Piece::new(color, kind))).expect("square on board");
}

/// Plays a list of (row, col, row1, col1) moves that must all succeed.
fn play(board: &mut Board, moves: &[(i8, i8, i8, i8)]) {
    for &(r, c, r1, c1) in moves {
        assert!(
            board.move_piece(r, c, r1, c1),
            "move ({r},{c})->({r1},{c1}) should be legal"
        );
    }
}

// =============================================================================
// Turn Ownership and Atomicity
// =============================================================================

#[test]
fn test_turn_strictly_alternates() {
    let mut board = Board::new();
    let attempts = [
        (6, 4, 4, 4), // legal
        (6, 3, 4, 3), // white again: wrong turn
        (1, 4, 3, 4), // legal
        (3, 4, 4, 4), // black pawn while white is to move
        (7, 6, 5, 5), // legal knight
        (0, 1, 2, 1), // knight cannot go straight
        (0, 1, 2, 2), // legal
    ];
    for (r, c, r1, c1) in attempts {
        let before = board.current_player_color();
        if board.move_piece(r, c, r1, c1) {
            assert_eq!(board.current_player_color(), before.opponent());
        } else {
            assert_eq!(board.current_player_color(), before);
        }
    }
    assert_eq!(board.current_player_color(), Color::White);
}

#[test]
fn test_rejected_moves_leave_board_unchanged() {
    let mut board = Board::new();
    play(&mut board, &[(6, 4, 4, 4), (1, 4, 3, 4)]);
    let snapshot = board.clone();

    let rejected = [
        (-1, 0, 0, 0),
        (0, 0, 0, 8),
        (4, 4, 4, 4),
        (5, 5, 4, 5),
        (0, 0, 1, 0),
        (7, 0, 6, 0),
        (7, 3, 5, 3), // queen path blocked
        (4, 4, 3, 4), // pawn into occupied square
        (7, 4, 7, 6), // castling with pieces in between
    ];
    for (r, c, r1, c1) in rejected {
        assert!(!board.move_piece(r, c, r1, c1));
        assert_eq!(board, snapshot, "({r},{c})->({r1},{c1}) mutated the board");
    }
}

#[test]
fn test_out_of_bounds_reason() {
    let mut board = Board::new();
    assert_eq!(
        board.try_move_piece(6, 0, 5, -1),
        Err(IllegalOperation::OutOfBounds { row: 5, col: -1 })
    );
}

// =============================================================================
// Sliding Pieces
// =============================================================================

#[test]
fn test_sliders_blocked_at_every_square() {
    let cases: [(PieceKind, Square, Square); 5] = [
        (PieceKind::Rook, (7, 0), (0, 0)),
        (PieceKind::Rook, (3, 0), (3, 7)),
        (PieceKind::Bishop, (7, 0), (0, 7)),
        (PieceKind::Queen, (0, 7), (7, 0)),
        (PieceKind::Queen, (4, 7), (4, 0)),
    ];
    for (kind, from, to) in cases {
        let dr = (to.0 - from.0).signum();
        let dc = (to.1 - from.1).signum();
        let mut step = 1;
        while (from.0 + step * dr, from.1 + step * dc) != to {
            let mut board = Board::empty();
            place(&mut board, from.0, from.1, Color::White, kind);
            let blocker = (from.0 + step * dr, from.1 + step * dc);
            place(&mut board, blocker.0, blocker.1, Color::Black, PieceKind::Pawn);
            assert!(
                !board.can_move(from.0, from.1, to.0, to.1),
                "{kind:?} from {from:?} passed blocker at step {step}"
            );
            step += 1;
        }

        let mut open = Board::empty();
        place(&mut open, from.0, from.1, Color::White, kind);
        assert!(open.can_move(from.0, from.1, to.0, to.1));
    }
}

// =============================================================================
// Promotion
// =============================================================================

fn promotion_board() -> Board {
    let mut board = Board::empty();
    place(&mut board, 7, 4, Color::White, PieceKind::King);
    place(&mut board, 0, 7, Color::Black, PieceKind::King);
    place(&mut board, 1, 2, Color::White, PieceKind::Pawn);
    board
}

#[test]
fn test_promote_to_queen() {
    let mut board = promotion_board();
    assert!(board.is_promoting_move(1, 2, 0, 2));
    assert!(board.move_and_promote_pawn(1, 2, 0, 2, 'Q'));
    assert_eq!(board.cell(0, 2), "wQ");
    assert_eq!(board.cell(1, 2), "  ");
    assert!(board.get_piece(0, 2).unwrap().moved());
    assert_eq!(board.current_player_color(), Color::Black);
}

#[test]
fn test_invalid_promotion_kind_is_rejected() {
    let mut board = promotion_board();
    let snapshot = board.clone();
    for code in ['X', 'K', 'P', 'q'] {
        assert!(!board.move_and_promote_pawn(1, 2, 0, 2, code));
        assert_eq!(board, snapshot);
    }
    assert_eq!(
        board.try_move_and_promote_pawn(1, 2, 0, 2, 'X'),
        Err(IllegalOperation::InvalidPromotion('X'))
    );
}

#[test]
fn test_promotion_by_capture() {
    let mut board = promotion_board();
    place(&mut board, 0, 1, Color::Black, PieceKind::Rook);
    place(&mut board, 0, 2, Color::Black, PieceKind::Bishop);
    // blocked straight ahead, so only the capture promotes
    assert!(!board.is_promoting_move(1, 2, 0, 2));
    assert!(board.is_promoting_move(1, 2, 0, 1));
    assert!(board.move_and_promote_pawn(1, 2, 0, 1, 'N'));
    assert_eq!(board.cell(0, 1), "wN");
}

#[test]
fn test_black_promotes_on_row_seven() {
    let mut board = Board::empty();
    place(&mut board, 7, 0, Color::White, PieceKind::King);
    place(&mut board, 0, 4, Color::Black, PieceKind::King);
    place(&mut board, 6, 5, Color::Black, PieceKind::Pawn);
    board.set_active_color(Color::Black);
    assert!(board.is_promoting_move(6, 5, 7, 5));
    assert!(board.move_and_promote_pawn(6, 5, 7, 5, 'R'));
    assert_eq!(board.cell(7, 5), "bR");
    // the new rook checks the white king along row 7
    assert_eq!(board.get_check(), Some(Color::White));
}

#[test]
fn test_promotion_respects_turn() {
    let mut board = promotion_board();
    board.set_active_color(Color::Black);
    assert!(!board.is_promoting_move(1, 2, 0, 2));
    assert_eq!(
        board.try_move_and_promote_pawn(1, 2, 0, 2, 'Q'),
        Err(IllegalOperation::WrongTurn)
    );
}

// =============================================================================
// King Safety
// =============================================================================

#[test]
fn test_king_next_to_rook_line() {
    let mut board = Board::empty();
    place(&mut board, 7, 4, Color::White, PieceKind::King);
    place(&mut board, 0, 0, Color::Black, PieceKind::King);
    place(&mut board, 2, 5, Color::Black, PieceKind::Rook);

    assert!(board.is_under_attack(7, 5, Color::Black));
    assert!(board.is_under_attack(6, 5, Color::Black));
    assert!(!board.can_move(7, 4, 7, 5));
    assert!(!board.can_move(7, 4, 6, 5));
    assert!(board.can_move(7, 4, 6, 4));
    assert!(board.can_move(7, 4, 7, 3));
}

#[test]
fn test_check_must_be_answered() {
    let mut board = Board::empty();
    place(&mut board, 7, 4, Color::White, PieceKind::King);
    place(&mut board, 6, 0, Color::White, PieceKind::Pawn);
    place(&mut board, 0, 0, Color::Black, PieceKind::King);
    place(&mut board, 0, 3, Color::Black, PieceKind::Rook);
    board.set_active_color(Color::Black);

    assert!(board.move_piece(0, 3, 0, 4));
    assert_eq!(board.get_check(), Some(Color::White));
    assert_eq!(board.get_mate(), None);

    // ignoring the check is refused
    assert_eq!(
        board.try_move_piece(6, 0, 5, 0),
        Err(IllegalOperation::ExposesKing)
    );
    assert!(board.move_piece(7, 4, 7, 3));
    assert_eq!(board.get_check(), None);
}

// =============================================================================
// Full Games
// =============================================================================

#[test]
fn test_fools_mate() {
    let mut board = Board::new();
    play(
        &mut board,
        &[
            (6, 5, 5, 5), // f3
            (1, 4, 3, 4), // e5
            (6, 6, 4, 6), // g4
        ],
    );
    assert_eq!(board.get_check(), None);
    assert!(board.move_piece(0, 3, 4, 7)); // Qh4#
    assert_eq!(board.get_check(), Some(Color::White));
    assert_eq!(board.get_mate(), Some(Color::White));
}

#[test]
fn test_scholars_mate() {
    let mut board = Board::new();
    play(
        &mut board,
        &[
            (6, 4, 4, 4), // e4
            (1, 4, 3, 4), // e5
            (7, 5, 4, 2), // Bc4
            (0, 1, 2, 2), // Nc6
            (7, 3, 3, 7), // Qh5
            (0, 6, 2, 5), // Nf6
        ],
    );
    assert!(board.move_piece(3, 7, 1, 5)); // Qxf7#
    assert_eq!(board.cell(1, 5), "wQ");
    assert_eq!(board.get_check(), Some(Color::Black));
    assert_eq!(board.get_mate(), Some(Color::Black));
}

#[test]
fn test_check_without_mate() {
    let mut board = Board::new();
    play(
        &mut board,
        &[
            (6, 4, 4, 4), // e4
            (1, 5, 2, 5), // f6
        ],
    );
    assert!(board.move_piece(7, 3, 3, 7)); // Qh5+
    assert_eq!(board.get_check(), Some(Color::Black));
    assert_eq!(board.get_mate(), None);
    assert!(board.move_piece(1, 6, 2, 6)); // g6 blocks
    assert_eq!(board.get_check(), None);
}
