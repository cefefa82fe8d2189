//! Command-line tools for inspecting canonical transposition keys.

mod canon;
mod census;
mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use env_logger::Env;
use log::info;
use noughts_core::{Board, Game};

use crate::canon::CanonReport;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Canon(args) => {
            let board = parse_board(&args.board)?;
            let report = CanonReport::new(board);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.render());
            }
        }
        Commands::Census(args) => {
            let root = match &args.from {
                Some(board) => Game::from_board(parse_board(board)?)
                    .with_context(|| format!("'{}' is not a reachable position", board))?,
                None => Game::new(),
            };
            let census = census::run(root, args.log_every)?;

            if args.json {
                println!("{}", serde_json::to_string_pretty(&census)?);
            } else {
                info!("Census complete");
                println!("Root: {}", census.root);
                println!("Tree nodes: {}", census.nodes);
                println!(
                    "Terminals: {} (X wins {}, O wins {}, draws {})",
                    census.terminals(),
                    census.x_wins,
                    census.o_wins,
                    census.draws
                );
                println!("Max depth: {}", census.max_depth);
                println!("Raw positions: {}", census.raw_positions);
                println!("Up to symmetry: {}", census.symmetry_classes);
                println!("Canonical keys: {}", census.canonical_keys);
                println!("Compression: {:.2}x", census.compression());
            }
        }
    }

    Ok(())
}

fn parse_board(board: &str) -> Result<Board> {
    board
        .parse()
        .with_context(|| format!("failed to parse board '{}'", board))
}
