//! Signer: concurrent hashing pipeline with a deterministic aggregate.
//!
//! Items flow source → single hash → multi hash → combine over bounded relays. The fanning
//! stages process items on a bounded worker pool, the non-reentrant chained hash is serialized
//! through one process-wide gate, and the final stage sorts before joining so the result does not
//! depend on arrival order.

pub mod engine;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

use log::debug;
use std::fmt::Display;
use std::sync::Arc;

use crate::engine::{DataSigner, sign_items};
use crate::pipeline::PipelineTuning;

/// Result alias used by public signer API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Single entry point: sign `items` (by their `Display` form) with the production primitives.
///
/// Returns the `_`-joined, sorted multi-hash values; an empty `items` yields `""`.
///
/// ```ignore
/// let sig = signer::sign(&[0, 1], &signer::SignOpts::default())?;
/// ```
pub fn sign<T: Display>(items: &[T], opts: &SignOpts) -> Result<String> {
    let tuning = PipelineTuning::from_opts(opts);
    debug!(
        "{} CONFIG: {:?} {:?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        opts,
        tuning
    );
    let items: Vec<Item> = items.iter().map(ToString::to_string).collect();
    sign_items(items, Arc::new(DataSigner::new(opts.chained)), &tuning)
}
