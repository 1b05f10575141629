//! Bounded relay between two stages.
//!
//! A relay is a crossbeam bounded channel: `send` blocks while full, `recv` blocks while empty
//! and open. Closing is dropping the last [`Outbox`]; items already buffered stay receivable, and
//! `recv` reports `Err` only once the relay is both closed and drained.

use crossbeam_channel::bounded;

use crate::{Inbox, Item, Outbox};

/// Create a relay with `cap` slots. A zero capacity is bumped to one so the relay still buffers.
pub fn relay(cap: usize) -> (Outbox, Inbox) {
    bounded::<Item>(cap.max(1))
}

/// Create a relay that is already closed and empty (source for the first stage).
pub fn closed_relay() -> Inbox {
    let (tx, rx) = relay(1);
    drop(tx);
    rx
}

/// Receive until the relay is closed and drained.
pub fn drain(inbox: &Inbox) -> Vec<Item> {
    inbox.iter().collect()
}
