use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[clap(author, version)]
#[clap(name = "noughts")]
#[clap(about = "Canonical transposition keys for tic-tac-toe positions", long_about = None)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Canon(CanonCommand),
    Census(CensusCommand),
}

#[derive(Args)]
#[clap(about = "Show every symmetric view of a board and its canonical key", long_about = None)]
pub struct CanonCommand {
    /// Board string, e.g. "XXO/X../O.O"
    pub board: String,

    #[clap(long)]
    pub json: bool,
}

#[derive(Args)]
#[clap(about = "Walk the full game tree and count distinct keys", long_about = None)]
pub struct CensusCommand {
    /// Root position (defaults to the empty board)
    #[clap(short, long)]
    pub from: Option<String>,

    /// Log progress every N nodes (0 to disable)
    #[clap(long, default_value_t = 100_000)]
    pub log_every: u64,

    #[clap(long)]
    pub json: bool,
}
