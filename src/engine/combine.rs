use anyhow::{Context, Result};
use log::debug;
use rayon::prelude::*;

use crate::pipeline::{Stage, drain};
use crate::utils::config::HashingConsts;
use crate::{Inbox, Item, Outbox};

/// Sort byte-wise ascending and join with `_`. Depends only on the multiset of `values`.
pub fn combine_results(mut values: Vec<Item>) -> String {
    values.par_sort_unstable();
    values.join(HashingConsts::COMBINE_SEPARATOR)
}

/// Stage C: single sequential consumer; emits exactly one value once its input closes.
#[derive(Clone, Copy, Debug, Default)]
pub struct CombineResults;

impl Stage for CombineResults {
    fn run(&self, input: Inbox, output: Outbox) -> Result<()> {
        let values = drain(&input);
        debug!("combine_results: {} values", values.len());
        output
            .send(combine_results(values))
            .context("send combined result: output relay closed")
    }

    fn name(&self) -> &str {
        "combine_results"
    }
}
