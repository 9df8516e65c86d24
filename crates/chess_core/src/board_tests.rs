use super::*;

#[test]
fn test_startpos_layout() {
    let board = Board::startpos();
    assert_eq!(board.occupied().popcount(), 32);
    assert_eq!(board.side_to_move, Color::White);
    assert_eq!(board.castling, CastlingRights::ALL);
    assert_eq!(board.en_passant, None);
    assert_eq!(
        board.piece_at(4).unwrap(),
        Some(Piece::new(Color::White, PieceKind::King))
    );
    assert_eq!(
        board.piece_at(59).unwrap(),
        Some(Piece::new(Color::Black, PieceKind::Queen))
    );
    assert_eq!(board.piece_at(28).unwrap(), None);
    assert!(board.check_invariants().is_ok());
}

#[test]
fn test_fen_startpos_matches_constants() {
    let parsed =
        Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
    assert_eq!(parsed, Board::startpos());
}

#[test]
fn test_piece_at_rejects_out_of_range() {
    let board = Board::startpos();
    assert_eq!(
        board.piece_at(64),
        Err(ChessError::InvalidSquare { square: 64 })
    );
    assert!(board.is_square_attacked(200, Color::White).is_err());
}

#[test]
fn test_king_square() {
    let board = Board::startpos();
    assert_eq!(board.king_square(Color::White), 4);
    assert_eq!(board.king_square(Color::Black), 60);
}

#[test]
#[should_panic(expected = "kings")]
fn test_king_square_panics_without_king() {
    let mut pieces = INIT_PIECES;
    pieces[Color::Black.idx()][PieceKind::King.idx()] = Bitboard::EMPTY;
    // Bypass validation to simulate a corrupted board.
    let board = Board {
        pieces,
        side_to_move: Color::White,
        castling: CastlingRights::NONE,
        en_passant: None,
    };
    board.king_square(Color::Black);
}

#[test]
fn test_from_parts_rejects_overlap_and_king_count() {
    let mut overlapping = INIT_PIECES;
    overlapping[Color::White.idx()][PieceKind::Queen.idx()].set(4); // on the king
    assert_eq!(
        Board::from_parts(overlapping, Color::White, CastlingRights::ALL, None),
        Err(ChessError::Invariant(InvariantViolation::OverlappingPieces {
            square: 4
        }))
    );

    let mut two_kings = INIT_PIECES;
    two_kings[Color::Black.idx()][PieceKind::King.idx()].set(40);
    assert_eq!(
        Board::from_parts(two_kings, Color::White, CastlingRights::ALL, None),
        Err(ChessError::Invariant(InvariantViolation::KingCount {
            color: Color::Black,
            count: 2
        }))
    );
}

#[test]
fn test_from_parts_drops_unreachable_castling() {
    // White h1 rook missing, black king moved to f8
    let board = Board::from_fen("r4k1r/8/8/8/8/8/8/R3K3 w KQkq - 0 1").unwrap();
    assert!(!board.castling.has(CastlingRights::WHITE_KINGSIDE));
    assert!(board.castling.has(CastlingRights::WHITE_QUEENSIDE));
    assert!(!board.castling.has(CastlingRights::BLACK_KINGSIDE));
    assert!(!board.castling.has(CastlingRights::BLACK_QUEENSIDE));
}

#[test]
fn test_invalid_fen_is_reported() {
    for fen in [
        "",
        "8/8/8 w - -",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq -",
        "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq -",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkz -",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9",
    ] {
        assert!(
            matches!(Board::from_fen(fen), Err(ChessError::InvalidFen(_))),
            "accepted '{fen}'"
        );
    }
}

#[test]
fn test_square_attacked_by_each_piece_kind() {
    // White: Kg1, Nc3, Bb2, Rd1, pawn h2. Black: Ke8, Qh4.
    let board = Board::from_fen("4k3/8/8/8/7q/2N5/1B5P/3R2K1 w - - 0 1").unwrap();
    let attacked = |sq, by| board.is_square_attacked(sq, by).unwrap();

    assert!(attacked(35, Color::White)); // d5 by knight c3
    assert!(attacked(16, Color::White)); // a3 by bishop b2
    assert!(!attacked(63, Color::White)); // h8, bishop blocked by own knight
    assert!(attacked(59, Color::White)); // d8 by rook d1 up the open file
    assert!(attacked(22, Color::White)); // g3 by pawn h2
    assert!(attacked(15, Color::White)); // h2 by king g1
    assert!(!attacked(36, Color::White)); // e5

    assert!(attacked(15, Color::Black)); // h2 by queen h4
    assert!(attacked(13, Color::Black)); // f2 by queen h4 diagonal
    assert!(!attacked(6, Color::Black)); // g1 is not on a queen line
}

#[test]
fn test_sliders_are_blocked() {
    // Black rook a8 behind white pawn a4 does not reach a1.
    let board = Board::from_fen("r3k3/8/8/8/P7/8/8/4K3 w - - 0 1").unwrap();
    assert!(board.is_square_attacked(24, Color::Black).unwrap()); // a4 itself
    assert!(!board.is_square_attacked(0, Color::Black).unwrap()); // a1 behind
}

#[test]
fn test_make_move_flips_turn_and_rejects_illegal() {
    let mut board = Board::startpos();
    let mv = board.make_move(12, 28).unwrap(); // e2e4
    assert_eq!(mv.kind, MoveKind::DoublePawnPush);
    assert_eq!(board.side_to_move, Color::Black);
    assert_eq!(board.en_passant, Some(20));

    let before = board.clone();
    assert_eq!(
        board.make_move(52, 28), // e7e4 is not a pawn move
        Err(ChessError::IllegalMove { from: 52, to: 28 })
    );
    assert_eq!(
        board.make_move(12, 20), // white piece, black to move
        Err(ChessError::IllegalMove { from: 12, to: 20 })
    );
    assert_eq!(
        board.make_move(64, 0),
        Err(ChessError::InvalidSquare { square: 64 })
    );
    assert_eq!(board, before);
}

#[test]
fn test_make_move_promotion_choice() {
    let mut board = Board::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let mut knight = board.clone();

    board.make_move(48, 56).unwrap();
    assert_eq!(
        board.piece_at(56).unwrap(),
        Some(Piece::new(Color::White, PieceKind::Queen))
    );

    knight
        .make_move_with_promotion(48, 56, Some(PieceKind::Knight))
        .unwrap();
    assert_eq!(
        knight.piece_at(56).unwrap(),
        Some(Piece::new(Color::White, PieceKind::Knight))
    );
}

#[test]
fn test_reset_restores_startpos() {
    let mut board = Board::startpos();
    board.make_move(6, 21).unwrap();
    board.reset();
    assert_eq!(board, Board::startpos());
}

#[test]
fn test_status_variants() {
    assert_eq!(Board::startpos().status(), GameStatus::Ongoing);

    let mated = Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
        .unwrap();
    assert_eq!(
        mated.status(),
        GameStatus::Checkmate {
            winner: Color::Black
        }
    );
    assert!(mated.is_checkmate());
    assert!(!mated.is_tied());

    let stalemate = Board::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(stalemate.is_stalemate());
    assert!(stalemate.is_tied());

    let bare = Board::from_fen("8/8/3k4/8/8/3KN3/8/8 w - - 0 1").unwrap();
    assert_eq!(bare.status(), GameStatus::InsufficientMaterial);
    assert!(bare.is_tied());
}

#[test]
fn test_display_draws_ranks_top_down() {
    let text = Board::startpos().to_string();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("rnbqkbnr"));
    assert_eq!(lines.nth(6), Some("RNBQKBNR"));
    assert_eq!(lines.next(), Some("white to move"));
}

#[test]
fn test_en_passant_square_must_match_side_to_move() {
    // d1 can never be an en-passant target
    assert_eq!(
        Board::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - d1 0 1"),
        Err(ChessError::InvalidEnPassant { square: 3 })
    );
    // Rank 3 target while White is to move
    assert!(Board::from_fen("4k3/8/8/8/4P3/8/8/4K3 w - e3 0 1").is_err());
    assert_eq!(
        Board::from_fen("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1")
            .unwrap()
            .en_passant,
        Some(20)
    );
    assert_eq!(
        Board::from_parts(INIT_PIECES, Color::White, CastlingRights::ALL, Some(44)),
        Ok(Board {
            en_passant: Some(44),
            ..Board::startpos()
        })
    );
}
