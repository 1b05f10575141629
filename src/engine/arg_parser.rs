use clap::Parser;
use std::path::PathBuf;

use crate::ChainedAlgo;

/// Concurrent hashing pipeline: single hash, multi hash, sorted combine.
#[derive(Clone, Parser)]
#[command(name = "signer")]
#[command(about = "Sign a list of items through the concurrent hash pipeline.")]
pub struct Cli {
    /// Items to sign.
    #[arg(value_name = "ITEMS")]
    pub items: Vec<String>,

    /// Read more items from FILE, one per line (blank lines skipped). Use `-` for stdin.
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Fan-out pool size per stage. Default: available threads, clamped.
    #[arg(long, short = 'w', value_parser = clap::value_parser!(usize))]
    pub workers: Option<usize>,

    /// Slots per relay between stages.
    #[arg(long, value_parser = clap::value_parser!(usize))]
    pub relay_cap: Option<usize>,

    /// Digest behind the serialized chained hash.
    #[arg(long, value_enum)]
    pub chained: Option<ChainedAlgo>,

    /// Print a JSON report instead of the bare signature.
    #[arg(long, short = 'j', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub json: Option<bool>,

    /// Verbose output.
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,
}
