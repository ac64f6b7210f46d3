use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use minefield_core::{BoardConfig, CellCount, Coord, Difficulty};

use settings::{GameSetup, Overrides, Settings};

mod command;
mod render;
mod session;
mod settings;

#[derive(Parser, Debug)]
#[command(version, about = "Play minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board preset: beginner, intermediate or expert
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Custom board rows, needs --cols and --mines too
    #[arg(long, requires_all = ["cols", "mines"])]
    rows: Option<Coord>,

    /// Custom board columns
    #[arg(long, requires_all = ["rows", "mines"])]
    cols: Option<Coord>,

    /// Custom mine count
    #[arg(long, requires_all = ["rows", "cols"])]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// TOML file with default difficulty, board and seed
    #[arg(long)]
    settings: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        let custom = match (self.rows, self.cols, self.mines) {
            (Some(rows), Some(cols), Some(mines)) => {
                Some(BoardConfig::new_unchecked(rows, cols, mines))
            }
            _ => None,
        };
        Overrides {
            difficulty: self.difficulty,
            custom,
            seed: self.seed,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let setup = GameSetup::resolve(settings, args.overrides())?;
    log::info!(
        "Starting {}x{} board with {} mines, seed: {:?}",
        setup.config.rows,
        setup.config.cols,
        setup.config.mines,
        setup.seed
    );

    let mut session = session::Session::new(setup)?;
    session.run(io::stdin().lock(), io::stdout().lock())
}
