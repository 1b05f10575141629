//! Standard stage chain and the entry point that runs it.

use anyhow::Result;
use log::debug;
use std::sync::Arc;

use crate::Item;
use crate::pipeline::{PipelineTuning, Stage, run_pipeline};

use super::combine::CombineResults;
use super::hashing::HashPrimitives;
use super::multi_hash::MultiHash;
use super::single_hash::SingleHash;

/// single hash → multi hash → combine, each fanning stage sized to `workers`.
pub fn standard_stages(primitives: Arc<dyn HashPrimitives>, workers: usize) -> Vec<Box<dyn Stage>> {
    vec![
        Box::new(SingleHash::new(Arc::clone(&primitives), workers)),
        Box::new(MultiHash::new(primitives, workers)),
        Box::new(CombineResults),
    ]
}

/// Run `items` through [`standard_stages`] and return the combined signature.
pub fn sign_items(
    items: Vec<Item>,
    primitives: Arc<dyn HashPrimitives>,
    tuning: &PipelineTuning,
) -> Result<String> {
    let count = items.len();
    let stages = standard_stages(primitives, tuning.workers);
    let signature = run_pipeline(items, &stages, tuning)?;
    debug!("signed {} items ({} bytes)", count, signature.len());
    Ok(signature)
}
