use anyhow::Result;
use log::{debug, warn};
use std::thread;

use crate::{Inbox, Item, Outbox};

/// Per-worker tally: items transformed, and how many of those could not be sent.
#[derive(Clone, Copy, Debug, Default)]
struct WorkerTally {
    handled: usize,
    dropped: usize,
}

/// Single fan-out worker: read items from `input`, transform, send on `output`.
fn fan_out_worker_loop<F>(input: Inbox, output: Outbox, transform: &F) -> WorkerTally
where
    F: Fn(Item) -> Item + Sync,
{
    let mut tally = WorkerTally::default();
    while let Ok(item) = input.recv() {
        // Keep draining after a failed send so upstream never blocks; the drop is reported.
        if output.send(transform(item)).is_err() {
            tally.dropped += 1;
        }
        tally.handled += 1;
    }
    tally
}

/// Apply `transform` to every item of `input` on a pool of `workers` threads and send the
/// results to `output` in completion order. Returns the number of items handled.
///
/// Blocks until `input` is closed and drained and every worker has finished. Each worker holds
/// a clone of `output`; the caller's copy is dropped here, so the output relay closes exactly
/// when the last worker exits. A panicking worker is re-raised after the others finish.
///
/// # Errors
/// If the output relay closed early and any result could not be sent.
pub fn run_fan_out<F>(input: Inbox, output: Outbox, workers: usize, transform: F) -> Result<usize>
where
    F: Fn(Item) -> Item + Sync,
{
    let workers = workers.max(1);
    let transform = &transform;
    let total = thread::scope(|s| {
        let handles: Vec<_> = (0..workers)
            .map(|_| {
                let input = input.clone();
                let output = output.clone();
                s.spawn(move || fan_out_worker_loop(input, output, transform))
            })
            .collect();
        drop(output);
        drop(input);

        let mut total = WorkerTally::default();
        let mut panic = None;
        for h in handles {
            match h.join() {
                Ok(t) => {
                    total.handled += t.handled;
                    total.dropped += t.dropped;
                }
                Err(payload) => {
                    panic.get_or_insert(payload);
                }
            }
        }
        if let Some(payload) = panic {
            std::panic::resume_unwind(payload);
        }
        total
    });
    debug!(
        "fan-out: {} workers handled {} items",
        workers, total.handled
    );
    if total.dropped > 0 {
        warn!(
            "fan-out: output relay closed, {} of {} items dropped",
            total.dropped, total.handled
        );
        anyhow::bail!(
            "dropped {} of {} items: output relay closed early",
            total.dropped,
            total.handled
        );
    }
    Ok(total.handled)
}
