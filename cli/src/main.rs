use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sweeper_core::{FileStorage, GameConfig, Leaderboard, PlayerName};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board configuration file holding `columns rows mines`
    #[arg(long, global = true, default_value = "files/config.cfg")]
    config: PathBuf,

    /// Leaderboard file, one `MM:SS,Name` per line
    #[arg(long, global = true, default_value = "files/leaderboard.txt")]
    leaderboard: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate and print the board configuration
    Config {
        #[arg(long)]
        json: bool,
    },
    /// List the best completion times
    Leaderboard {
        /// Mark the entry at this 1-based rank
        #[arg(long)]
        highlight: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Record a completion time
    Submit {
        #[arg(long)]
        seconds: u32,
        #[arg(long)]
        name: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();
    log::debug!("{:?}", args);

    run(args, &mut io::stdout().lock())
}

fn run(args: Args, out: &mut impl Write) -> Result<()> {
    match args.command {
        Command::Config { json } => {
            let config = GameConfig::load(&args.config)
                .with_context(|| format!("invalid board config {}", args.config.display()))?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&config)?)?;
            } else {
                writeln!(
                    out,
                    "{} columns x {} rows, {} mines, {} safe cells",
                    config.columns(),
                    config.rows(),
                    config.mines,
                    config.safe_cells()
                )?;
            }
        }
        Command::Leaderboard { highlight, json } => {
            let leaderboard = Leaderboard::new(FileStorage::new(&args.leaderboard));
            let highlight = highlight.and_then(|rank| rank.checked_sub(1));
            print_leaderboard(&leaderboard, highlight, json, out)?;
        }
        Command::Submit { seconds, name } => {
            let name =
                PlayerName::new(&name).with_context(|| format!("invalid name {:?}", name))?;
            let mut leaderboard = Leaderboard::new(FileStorage::new(&args.leaderboard));
            let rank = leaderboard
                .submit(seconds, name.as_str())
                .with_context(|| format!("could not update {}", args.leaderboard.display()))?;
            match rank {
                Some(rank) => writeln!(out, "{} ranked #{}", name, rank + 1)?,
                None => writeln!(out, "{} did not make the leaderboard", name)?,
            }
            print_leaderboard(&leaderboard, rank, false, out)?;
        }
    }
    Ok(())
}

fn print_leaderboard(
    leaderboard: &Leaderboard<FileStorage>,
    highlight: Option<usize>,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let path = leaderboard.storage().path();
    let entries = leaderboard
        .list(highlight)
        .with_context(|| format!("could not read {}", path.display()))?;

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
        return Ok(());
    }

    writeln!(out, "LEADERBOARD")?;
    for entry in &entries {
        writeln!(out, "{}", entry)?;
    }
    Ok(())
}
