use anyhow::Context as _;
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use shannon_core::config::parse_level;
use shannon_core::core::engine::{GuessPhase, Oracle};
use shannon_core::core::types::Symbol;
use shannon_core::error::ShannonError;
use shannon_core::learning::index;
use shannon_core::logging::init_logging;
use shannon_core::persistence::load_corpus;
use shannon_core::session::{GameSession, PlayMode};
use std::io::{stdin, stdout, Write};
use std::path::{Path, PathBuf};

/// Plays Shannon's guessing game against statistics learned from a corpus.
#[derive(Debug, Parser)]
#[command(name = "shannon", version, about = "Order-2 next-character guessing game")]
struct Cli {
    /// Log level used when RUST_LOG is not set.
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Reconstruct a phrase one character at a time.
    Play {
        #[arg(short, long, value_name = "FILE")]
        corpus: PathBuf,
        /// The whole phrase, or its known start when --length is given.
        #[arg(short, long)]
        phrase: String,
        /// Total phrase length for interactive play; 0 plays automatically.
        #[arg(short, long, default_value_t = 0)]
        length: usize,
    },
    /// Print every slot of the prefix table built from a corpus.
    Dump {
        #[arg(short, long, value_name = "FILE")]
        corpus: PathBuf,
        #[arg(long)]
        json: bool,
    },
}

/// Asks on the terminal whether each guess is right. Closes once stdin
/// ends or cannot be read.
#[derive(Default)]
struct ConsoleOracle {
    closed: bool,
}

impl Oracle for ConsoleOracle {
    fn confirm(&mut self, candidate: Symbol) -> bool {
        loop {
            print!(" {}? (y/n) ", format!("{candidate:?}").bold());
            if stdout().flush().is_err() {
                self.closed = true;
                return false;
            }
            let mut input = String::new();
            match stdin().read_line(&mut input) {
                Ok(0) | Err(_) => {
                    println!();
                    self.closed = true;
                    return false;
                }
                Ok(_) => {}
            }
            match input.trim_start().chars().next() {
                Some('y' | 'Y') => return true,
                Some('n' | 'N') => return false,
                _ => continue,
            }
        }
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = cli.log_level.as_deref().map(parse_level).transpose()?;
    init_logging(level);

    match cli.command {
        Command::Play { corpus, phrase, length } => run_play(&corpus, &phrase, length),
        Command::Dump { corpus, json } => run_dump(&corpus, json),
    }
}

fn run_play(path: &Path, phrase: &str, length: usize) -> anyhow::Result<()> {
    let corpus = load_corpus(path)?;
    println!("Corpus loaded. ({} characters)", corpus.len());
    let table = index(&corpus.text, corpus.distinct_symbols)
        .with_context(|| format!("indexing {}", path.display()))?;

    let mode = PlayMode::from_length(length);
    let mut session = GameSession::new(&table, phrase, mode)?;
    let mut oracle = ConsoleOracle::default();
    print_progress(&session, 0, None);

    let start = std::time::Instant::now();
    loop {
        match session.step(&mut oracle) {
            Ok(Some(outcome)) => print_progress(&session, outcome.guesses, Some(outcome.phase)),
            Ok(None) => break,
            Err(ShannonError::OracleClosed { progress, guesses }) => {
                println!("Input closed. Stopped at '{progress}' after {guesses} guesses.");
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        }
    }

    println!(
        "{}",
        format!(" Solved it in {} guesses!", session.total_guesses()).green()
    );
    if mode == PlayMode::Automatic {
        println!("Took {:0.6} seconds", start.elapsed().as_secs_f64());
    }
    Ok(())
}

fn print_progress(session: &GameSession<'_>, guesses: u64, phase: Option<GuessPhase>) {
    let done = session.progress().chars().count();
    let gap = "_".repeat(session.target_len().saturating_sub(done));
    let count = match phase {
        Some(GuessPhase::Fallback) => format!("({guesses})").yellow(),
        _ => format!("({guesses})").stylize(),
    };
    println!("{}{}  {}", session.progress(), gap.dark_grey(), count);
}

fn run_dump(path: &Path, json: bool) -> anyhow::Result<()> {
    let corpus = load_corpus(path)?;
    let table = index(&corpus.text, corpus.distinct_symbols)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
    } else {
        println!("{table}");
    }
    Ok(())
}
