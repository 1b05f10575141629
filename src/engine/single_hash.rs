use anyhow::Result;
use std::sync::Arc;

use crate::engine::hashing::{CHAINED_GATE, HashPrimitives};
use crate::pipeline::{Stage, run_fan_out};
use crate::utils::config::HashingConsts;
use crate::{Inbox, Item, Outbox};

/// `fast(data) ~ fast(chained(data))`.
///
/// The two halves run as a `rayon::join` pair, so `fast(data)` proceeds while the other half
/// waits on the gate. The gate is held for the single `chained_hash` call only.
pub fn single_hash(data: &str, primitives: &dyn HashPrimitives) -> String {
    let (crc, crc_of_chained) = rayon::join(
        || primitives.fast_hash(data),
        || {
            let chained = CHAINED_GATE.call(|| primitives.chained_hash(data));
            primitives.fast_hash(&chained)
        },
    );
    format!(
        "{}{}{}",
        crc,
        HashingConsts::SINGLE_HASH_SEPARATOR,
        crc_of_chained
    )
}

/// Stage A: [`single_hash`] per item, fanned out over the worker pool.
pub struct SingleHash {
    primitives: Arc<dyn HashPrimitives>,
    workers: usize,
}

impl SingleHash {
    pub fn new(primitives: Arc<dyn HashPrimitives>, workers: usize) -> Self {
        Self {
            primitives,
            workers,
        }
    }
}

impl Stage for SingleHash {
    fn run(&self, input: Inbox, output: Outbox) -> Result<()> {
        let primitives = self.primitives.as_ref();
        run_fan_out(input, output, self.workers, |data: Item| {
            single_hash(&data, primitives)
        })?;
        Ok(())
    }

    fn name(&self) -> &str {
        "single_hash"
    }
}
