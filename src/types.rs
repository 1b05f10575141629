//! Public and internal types for the signer API and pipeline.

use crossbeam_channel::{Receiver, Sender};
use serde::{Deserialize, Serialize};

/// One value flowing through the pipeline, carried as its string representation.
pub type Item = String;

/// Producer end of a relay. The relay closes when the last `Outbox` is dropped.
pub type Outbox = Sender<Item>;

/// Consumer end of a relay. `recv()` returns `Err` once the relay is closed and drained.
pub type Inbox = Receiver<Item>;

/// Which digest backs the serialized (chained) hash.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChainedAlgo {
    /// Lowercase hex MD5.
    #[default]
    Md5,
    /// Lowercase hex BLAKE3.
    Blake3,
}

/// Lib-only options for [`sign`](crate::sign).
#[derive(Clone, Debug, Default)]
pub struct SignOpts {
    /// Fan-out pool size per stage. When None, derived from available threads.
    pub workers: Option<usize>,
    /// Slots per relay. When None, uses [`RelayConsts::CAPACITY`](crate::utils::config::RelayConsts::CAPACITY).
    pub relay_cap: Option<usize>,
    /// Digest behind the chained hash.
    pub chained: ChainedAlgo,
}

impl From<&Opts> for SignOpts {
    fn from(o: &Opts) -> Self {
        SignOpts {
            workers: o.workers,
            relay_cap: o.relay_cap,
            chained: o.chained,
        }
    }
}

/// Full options (CLI). Use [`SignOpts`] for lib.
#[derive(Clone, Debug, Default)]
pub struct Opts {
    pub workers: Option<usize>,
    pub relay_cap: Option<usize>,
    pub chained: ChainedAlgo,
    /// Debug-level logging.
    pub verbose: bool,
    /// Print a JSON report instead of the bare signature.
    pub json: bool,
}

/// What the CLI prints with `--json`.
#[derive(Clone, Debug, Serialize)]
pub struct SignReport {
    pub items: usize,
    pub result: String,
}
