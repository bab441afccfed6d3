use castellan_core::{perft::perft, Board};
use pretty_assertions::assert_eq;

fn perft_fen(fen: &str, depth: usize) -> u64 {
    let (board, to_move) = Board::try_parse_fen(fen).unwrap();
    perft(&board, to_move, depth)
}

#[test]
fn perft_kiwipete() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

    assert_eq!(perft_fen(fen, 1), 48);
    assert_eq!(perft_fen(fen, 2), 2039);
}

#[test]
fn perft_position_3() {
    let fen = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

    assert_eq!(perft_fen(fen, 1), 14);
    assert_eq!(perft_fen(fen, 2), 191);
    assert_eq!(perft_fen(fen, 3), 2812);
}

#[test]
fn perft_position_4() {
    let fen = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";

    assert_eq!(perft_fen(fen, 1), 6);
    assert_eq!(perft_fen(fen, 2), 264);
}

#[test]
fn perft_after_en_passant_setup() {
    // Position 3 after e2e4: the black pawn on f4 may take en passant.
    let fen = "8/2p5/3p4/KP5r/1R2Pp1k/8/6P1/8 b - e3 0 1";

    assert_eq!(perft_fen(fen, 1), 16);
}
