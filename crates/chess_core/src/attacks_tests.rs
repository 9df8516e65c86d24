use super::*;

#[test]
fn test_knight_attacks() {
    // Knight on e4 (square 28) should attack 8 squares
    assert_eq!(knight_attacks(28).popcount(), 8);

    // Knight on a1 attacks only b3 and c2
    let attacks = knight_attacks(0);
    assert_eq!(attacks.popcount(), 2);
    assert!(attacks.contains(10)); // c2
    assert!(attacks.contains(17)); // b3

    // Knight on h8 is mirrored
    assert_eq!(knight_attacks(63).popcount(), 2);
}

#[test]
fn test_king_attacks() {
    assert_eq!(king_attacks(28).popcount(), 8);
    assert_eq!(king_attacks(0).popcount(), 3);
    assert_eq!(king_attacks(4).popcount(), 5); // e1
}

#[test]
fn test_pawn_attacks_by_color() {
    // White pawn on e4 attacks d5 and f5
    let attacks = pawn_attacks(28, Color::White);
    assert_eq!(attacks, Bitboard::from_squares(&[35, 37]));

    // Black pawn on e4 attacks d3 and f3
    let attacks = pawn_attacks(28, Color::Black);
    assert_eq!(attacks, Bitboard::from_squares(&[19, 21]));

    // Edge pawns do not wrap
    assert_eq!(pawn_attacks(8, Color::White), Bitboard::from_square(17));
    assert_eq!(pawn_attacks(15, Color::White), Bitboard::from_square(22));
}

#[test]
fn test_rays_exclude_origin() {
    for dir in 0..8 {
        for sq in 0..64u8 {
            assert!(!RAYS[dir][sq as usize].contains(sq));
        }
    }
    // North from a1 is the rest of the a-file
    assert_eq!(RAYS[0][0].popcount(), 7);
}

#[test]
fn test_rook_attacks_empty_board() {
    assert_eq!(rook_attacks(28, Bitboard::EMPTY).popcount(), 14);
}

#[test]
fn test_bishop_attacks_empty_board() {
    assert_eq!(bishop_attacks(28, Bitboard::EMPTY).popcount(), 13);
}

#[test]
fn test_rook_attacks_with_blockers() {
    // Rook on a1, blocker on a4
    let attacks = rook_attacks(0, Bitboard::from_square(24));
    assert!(attacks.contains(8)); // a2
    assert!(attacks.contains(16)); // a3
    assert!(attacks.contains(24)); // a4 (can capture)
    assert!(!attacks.contains(32)); // a5 (blocked)
    assert!(attacks.contains(7)); // h1
}

#[test]
fn test_bishop_attacks_stop_on_descending_ray() {
    // Bishop on f6 (45), blockers on d4 (27) and h8 (63)
    let attacks = bishop_attacks(45, Bitboard::from_squares(&[27, 63]));
    assert!(attacks.contains(36)); // e5
    assert!(attacks.contains(27)); // d4 (blocker)
    assert!(!attacks.contains(18)); // c3 (behind blocker)
    assert!(attacks.contains(54)); // g7
    assert!(attacks.contains(63)); // h8
}

#[test]
fn test_queen_is_union_of_rook_and_bishop() {
    let occ = Bitboard::from_squares(&[12, 30, 44]);
    assert_eq!(
        queen_attacks(28, occ),
        rook_attacks(28, occ) | bishop_attacks(28, occ)
    );
}
