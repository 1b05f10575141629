//! Pipeline tuning: pool size and relay capacity resolved from options.

use crate::SignOpts;
use crate::utils::config::{RelayConsts, WorkerLimits};

/// Resolved sizing for one run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineTuning {
    /// Fan-out pool size for each fanning stage.
    pub workers: usize,
    /// Slots per relay.
    pub relay_cap: usize,
}

impl Default for PipelineTuning {
    fn default() -> Self {
        Self {
            workers: WorkerLimits::current().default_workers(),
            relay_cap: RelayConsts::CAPACITY,
        }
    }
}

impl PipelineTuning {
    /// Resolve from options: requested values are clamped, missing ones fall back to defaults.
    pub fn from_opts(opts: &SignOpts) -> Self {
        let limits = WorkerLimits::current();
        Self {
            workers: opts
                .workers
                .map_or_else(|| limits.default_workers(), |n| limits.clamp_requested(n)),
            relay_cap: opts.relay_cap.unwrap_or(RelayConsts::CAPACITY).max(1),
        }
    }
}
