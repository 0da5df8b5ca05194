//! Randomized cross-check of both balancing strategies against a sorted `Vec`.
//!
//! Every operation is mirrored on the oracle, then the tree is validated and compared element by element.

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::{debug, error, info, LevelFilter};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use simplelog::{ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger};
use thiserror::Error;

use ordtree::{Avl, Balance, ByKey, Natural, OrderedTree, RedBlack, Violation};

// (key, serial): ordered by key only, so the serial shows where duplicates ended up
type Entry = (u32, u64);

#[derive(Parser, Debug)]
#[command(about = "Cross-check the balanced trees against a sorted Vec")]
struct Cli {
    /// Operations per run
    #[arg(long, default_value_t = 10_000)]
    ops: usize,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Keys are drawn from 0..KEYS
    #[arg(long, default_value_t = 512, value_parser = clap::value_parser!(u32).range(1..))]
    keys: u32,

    #[arg(long, value_enum, default_value_t = Strategy::Both)]
    strategy: Strategy,

    /// Also write a debug-level log here
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log debug output to the terminal
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Strategy {
    Avl,
    RedBlack,
    Both,
}

#[derive(Debug, Error)]
enum StressError {
    #[error("{strategy} tree broke an invariant after op {op}: {source}")]
    Invariant {
        strategy: &'static str,
        op: usize,
        #[source]
        source: Violation,
    },

    #[error("{strategy} tree diverged from the oracle at op {op}: {what}")]
    Divergence {
        strategy: &'static str,
        op: usize,
        what: String,
    },

    #[error("could not create log file {}: {source}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
}

fn initialize_logging(cli: &Cli) -> Result<(), StressError> {
    let term_level = if cli.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![
        TermLogger::new(term_level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto),
    ];
    if let Some(path) = &cli.log_file {
        let file = File::create(path).map_err(|source| StressError::LogFile { path: path.clone(), source })?;
        loggers.push(WriteLogger::new(LevelFilter::Debug, Config::default(), file));
    }
    CombinedLogger::init(loggers)?;
    Ok(())
}

struct Run<'a, B: Balance> {
    strategy: &'static str,
    multi: bool,
    tree: OrderedTree<Entry, ByKey<Natural>, B>,
    oracle: Vec<Entry>,
    cli: &'a Cli,
}

impl<'a, B: Balance> Run<'a, B> {
    fn new(strategy: &'static str, multi: bool, cli: &'a Cli) -> Self {
        Self { strategy, multi, tree: OrderedTree::new(), oracle: Vec::new(), cli }
    }

    fn diverged(&self, op: usize, what: impl Into<String>) -> StressError {
        StressError::Divergence { strategy: self.strategy, op, what: what.into() }
    }

    fn execute(mut self) -> Result<(), StressError> {
        let mut rng = StdRng::seed_from_u64(self.cli.seed);
        let flavor = if self.multi { "multi" } else { "unique" };
        info!("{} ({flavor}): {} ops over {} keys, seed {}", self.strategy, self.cli.ops, self.cli.keys, self.cli.seed);

        for op in 0..self.cli.ops {
            let entry = (rng.gen_range(0..self.cli.keys), op as u64);
            match rng.gen_range(0..100) {
                0 => {
                    self.tree.clear();
                    self.oracle.clear();
                }
                1..=54 => self.insert(op, entry)?,
                55..=84 => self.remove(op, entry)?,
                _ => self.erase_lower_bound(op, entry)?,
            }
            self.check(op)?;
        }

        info!("{} ({flavor}): done, {} elements left, height {}", self.strategy, self.tree.len(), self.tree.height());
        Ok(())
    }

    fn insert(&mut self, op: usize, entry: Entry) -> Result<(), StressError> {
        // duplicates go after their equals
        let at = self.oracle.partition_point(|e| e.0 <= entry.0);
        if self.multi {
            let c = self.tree.insert_multi(entry);
            self.oracle.insert(at, entry);
            if self.tree.get(c) != Some(&entry) {
                return Err(self.diverged(op, format!("insert_multi({entry:?}) returned the wrong position")));
            }
            return Ok(());
        }

        let present = at > 0 && self.oracle[at - 1].0 == entry.0;
        let (c, inserted) = self.tree.insert_unique(entry);
        if inserted == present {
            return Err(self.diverged(op, format!("insert_unique({entry:?}) reported inserted = {inserted}")));
        }
        if inserted {
            self.oracle.insert(at, entry);
            if self.tree.get(c) != Some(&entry) {
                return Err(self.diverged(op, format!("insert_unique({entry:?}) returned the wrong position")));
            }
        } else if c != self.tree.end() {
            return Err(self.diverged(op, "rejected insert did not return end()"));
        }
        Ok(())
    }

    fn remove(&mut self, op: usize, probe: Entry) -> Result<(), StressError> {
        let at = self.oracle.partition_point(|e| e.0 < probe.0);
        let c = self.tree.find(&probe);
        let expected = self.oracle.get(at).filter(|e| e.0 == probe.0).copied();

        match expected {
            None if c == self.tree.end() => Ok(()),
            None => Err(self.diverged(op, format!("find({}) hit a missing key", probe.0))),
            Some(_) if c == self.tree.end() => Err(self.diverged(op, format!("find({}) missed", probe.0))),
            Some(expected) => {
                self.oracle.remove(at);
                let (value, _) = self.tree.remove(c);
                if value != expected {
                    return Err(self.diverged(op, format!("removed {value:?}, expected {expected:?}")));
                }
                Ok(())
            }
        }
    }

    fn erase_lower_bound(&mut self, op: usize, probe: Entry) -> Result<(), StressError> {
        let at = self.oracle.partition_point(|e| e.0 < probe.0);
        let c = self.tree.lower_bound(&probe);
        if c == self.tree.end() {
            if at != self.oracle.len() {
                return Err(self.diverged(op, format!("lower_bound({}) was end()", probe.0)));
            }
            return Ok(());
        }

        let next = self.tree.delete(c);
        self.oracle.remove(at);
        if self.tree.get(next) != self.oracle.get(at) {
            return Err(self.diverged(op, "delete returned the wrong successor"));
        }
        Ok(())
    }

    fn check(&self, op: usize) -> Result<(), StressError> {
        self.tree
            .validate()
            .map_err(|source| StressError::Invariant { strategy: self.strategy, op, source })?;

        if self.tree.len() != self.oracle.len() {
            return Err(self.diverged(op, format!("len {} vs {}", self.tree.len(), self.oracle.len())));
        }
        if let Some(index) = self.tree.iter().zip(&self.oracle).position(|(a, b)| a != b) {
            return Err(self.diverged(op, format!("traversal differs at index {index}")));
        }
        Ok(())
    }
}

fn stress(cli: &Cli) -> Result<(), StressError> {
    debug!("{cli:?}");
    if cli.strategy != Strategy::RedBlack {
        Run::<Avl>::new("avl", false, cli).execute()?;
        Run::<Avl>::new("avl", true, cli).execute()?;
    }
    if cli.strategy != Strategy::Avl {
        Run::<RedBlack>::new("red-black", false, cli).execute()?;
        Run::<RedBlack>::new("red-black", true, cli).execute()?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = initialize_logging(&cli) {
        eprintln!("stress: {err}");
        return ExitCode::FAILURE;
    }

    match stress(&cli) {
        Ok(()) => {
            info!("all runs agree with the oracle");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
