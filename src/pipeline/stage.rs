//! The `Stage` seam: one transform step between an input relay and an output relay.

use anyhow::Result;

use crate::{Inbox, Outbox};

/// A pipeline step. `run` consumes `input` until it closes and returns once it is done producing;
/// `output` is dropped when `run` returns, which closes the next relay.
///
/// An `Err` fails the whole run once every other stage has finished.
pub trait Stage: Send + Sync {
    fn run(&self, input: Inbox, output: Outbox) -> Result<()>;

    /// Name used in logs and failure reports.
    fn name(&self) -> &str {
        "stage"
    }
}

/// Any `Fn(Inbox, Outbox) -> Result<()>` is a stage (handy for sources, sinks and tests).
impl<F> Stage for F
where
    F: Fn(Inbox, Outbox) -> Result<()> + Send + Sync,
{
    fn run(&self, input: Inbox, output: Outbox) -> Result<()> {
        self(input, output)
    }
}
