use std::time::{Duration, Instant};

use castellan_core::{
    board::{Board, Color, CoordMove},
    perft::{perft, perft_divide},
    Game, GameOptions,
};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Perft tester for the castellan rule engine.
///
/// Counts the leaves of the legal move tree from a position, to compare the
/// rule engine against published node counts.
#[derive(Parser, Debug)]
struct Args {
    /// Starting position of the board.
    ///
    /// Expects either the string "startpos" or a valid position in
    /// Forsyth-Edwards Notation (FEN). Additional alterations to the position
    /// can be specified via the --moves option.
    #[arg(short, long, default_value = "startpos", value_parser = parse_position)]
    position: Position,

    /// Additional moves to play before running perft.
    ///
    /// Plays the specified moves on top of the position specified with
    /// `--position` before running perft. Can be used to quickly test
    /// variations on a position.
    ///
    /// Moves should consist of the starting square in algebraic notation
    /// followed by the ending square in algebraic notation, plus an optional
    /// promotion target as a lowercase FEN char, e.g. `d2d4`, `e7e8q`
    #[arg(short, long, num_args(0..))]
    moves: Vec<CoordMove>,

    /// Exact depth to search to.
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..), default_value_t = 4)]
    depth: u8,

    /// Run in divide mode.
    ///
    /// When provided, will run perft down to the provided depth and list each
    /// possible move in the current position along with the number of nodes
    /// found under that move. This is useful for debugging errors by
    /// identifying the exact sequence of moves under which they occur.
    #[arg(long)]
    divide: bool,
}

#[derive(Debug, Clone)]
struct Position {
    board: Board,
    to_move: Color,
}

fn parse_position(s: &str) -> Result<Position, String> {
    if s == "startpos" {
        return Ok(Position {
            board: Board::starting_position(),
            to_move: Color::White,
        });
    }

    Board::try_parse_fen(s)
        .map(|(board, to_move)| Position { board, to_move })
        .map_err(|e| format!("Expected `startpos` or a valid FEN string. FEN parsing error: {e}"))
}

fn generic_perft(board: &Board, to_move: Color, max_depth: usize) {
    let mut total_time = Duration::ZERO;
    let mut last_depth_time = Duration::ZERO;
    let mut total_nodes = 0;

    for depth in 1..=max_depth {
        let start_time = Instant::now();

        let nodes = perft(board, to_move, depth);

        let time_taken = start_time.elapsed();
        debug!(depth, nodes, ?time_taken, "perft depth finished");

        println!(
            "Depth: {depth}\tNodes: {nodes}\tTime taken: {:.3}s",
            time_taken.as_secs_f64()
        );

        total_time += time_taken;
        last_depth_time = time_taken;
        total_nodes += nodes;
    }

    println!();

    let nodes_per_second = total_nodes as f64 / last_depth_time.as_secs_f64();

    println!(
        "Total nodes: {total_nodes}\tTotal time: {:.3}s\tNodes per second: {:.3}",
        total_time.as_secs_f64(),
        nodes_per_second
    );
}

fn divided_perft(board: &Board, to_move: Color, depth: usize) {
    let mut total_nodes = 0;
    for (m, nodes) in perft_divide(board, to_move, depth) {
        total_nodes += nodes;
        println!("{}: {nodes}", CoordMove::from(m));
    }

    println!();
    println!("Nodes searched: {total_nodes}");
}

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let Args {
        position,
        moves,
        depth,
        divide,
    } = Args::parse();

    let mut game = Game::with_options(position.board, position.to_move, GameOptions::default());
    for move_spec in moves {
        let side = game.to_move();
        let outcome =
            game.attempt_move_with_promotion(side, move_spec.from, move_spec.to, move_spec.promotion);
        if !outcome.is_accepted() {
            return Err(format!(
                "Move `{move_spec}` is invalid to play in this position ({outcome:?}, {})",
                game.board().fen(side)
            ));
        }
    }

    let board = game.board();
    let to_move = game.to_move();
    info!(fen = %board.fen(to_move), depth, divide, "running perft");

    if divide {
        divided_perft(board, to_move, depth as _)
    } else {
        generic_perft(board, to_move, depth as _);
    }

    Ok(())
}
