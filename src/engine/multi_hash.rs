use anyhow::Result;
use rayon::prelude::*;
use std::sync::Arc;

use crate::engine::hashing::HashPrimitives;
use crate::pipeline::{Stage, run_fan_out};
use crate::utils::config::HashingConsts;
use crate::{Inbox, Item, Outbox};

/// Concatenation of `fast(i ++ data)` for `i` in `0..6`, in index order.
///
/// Variants are computed in parallel on the rayon pool; `collect` places each result at its
/// index, so completion order never affects the result.
pub fn multi_hash(data: &str, primitives: &dyn HashPrimitives) -> String {
    (0..HashingConsts::MULTI_HASH_VARIANTS)
        .into_par_iter()
        .map(|th| primitives.fast_hash(&format!("{th}{data}")))
        .collect::<Vec<_>>()
        .concat()
}

/// Stage B: [`multi_hash`] per item, fanned out over the worker pool.
pub struct MultiHash {
    primitives: Arc<dyn HashPrimitives>,
    workers: usize,
}

impl MultiHash {
    pub fn new(primitives: Arc<dyn HashPrimitives>, workers: usize) -> Self {
        Self {
            primitives,
            workers,
        }
    }
}

impl Stage for MultiHash {
    fn run(&self, input: Inbox, output: Outbox) -> Result<()> {
        let primitives = self.primitives.as_ref();
        run_fan_out(input, output, self.workers, |data: Item| {
            multi_hash(&data, primitives)
        })?;
        Ok(())
    }

    fn name(&self) -> &str {
        "multi_hash"
    }
}
