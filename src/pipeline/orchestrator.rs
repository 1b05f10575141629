use anyhow::Result;
use log::debug;
use std::thread::{self, ScopedJoinHandle};

use crate::Item;
use crate::pipeline::context::PipelineTuning;
use crate::pipeline::error_handler::join_stage_handles;
use crate::pipeline::relay::{closed_relay, drain, relay};
use crate::pipeline::stage::Stage;

/// Run `stages` in sequence, each on its own thread, starting from an empty closed source relay.
///
/// Stage `i` reads the relay stage `i - 1` writes. Returns every value that reached the terminal
/// relay once all stages have returned. Fails, after the rest have drained, if any stage panicked,
/// returned an error, or returned while items were still arriving on its input.
pub fn execute_pipeline(stages: &[Box<dyn Stage>], tuning: &PipelineTuning) -> Result<Vec<Item>> {
    drive(Vec::new(), stages, tuning)
}

/// Feed `items` into the first stage and return the single value the last stage produced.
pub fn run_pipeline(
    items: Vec<Item>,
    stages: &[Box<dyn Stage>],
    tuning: &PipelineTuning,
) -> Result<Item> {
    let mut terminal = drive(items, stages, tuning)?;
    if terminal.len() != 1 {
        anyhow::bail!(
            "pipeline produced {} terminal values, expected exactly one",
            terminal.len()
        );
    }
    terminal
        .pop()
        .ok_or_else(|| anyhow::anyhow!("pipeline produced no terminal value"))
}

/// Source relay → stage threads → terminal relay → Vec.
fn drive(
    source: Vec<Item>,
    stages: &[Box<dyn Stage>],
    tuning: &PipelineTuning,
) -> Result<Vec<Item>> {
    let cap = tuning.relay_cap;
    debug!(
        "pipeline: {} stages, {} source items, relay cap {}, {} workers",
        stages.len(),
        source.len(),
        cap,
        tuning.workers
    );

    thread::scope(|s| -> Result<Vec<Item>> {
        let mut handles: Vec<(String, ScopedJoinHandle<'_, Result<()>>)> =
            Vec::with_capacity(stages.len() + 1);

        let mut input = if source.is_empty() {
            closed_relay()
        } else {
            let (tx, rx) = relay(cap);
            let feeder = s.spawn(move || -> Result<()> {
                let total = source.len();
                let mut dropped = 0usize;
                for item in source {
                    if tx.send(item).is_err() {
                        dropped += 1;
                    }
                }
                debug!("source: emitted {} items", total - dropped);
                if dropped > 0 {
                    anyhow::bail!(
                        "dropped {dropped} of {total} source items: first stage closed its input"
                    );
                }
                Ok(())
            });
            handles.push(("source".to_string(), feeder));
            rx
        };

        for (idx, stage) in stages.iter().enumerate() {
            let (out_tx, out_rx) = relay(cap);
            let stage_input = std::mem::replace(&mut input, out_rx);
            let name = format!("{}#{}", stage.name(), idx);
            let label = name.clone();
            let handle = s.spawn(move || -> Result<()> {
                debug!("{}: started", label);
                // Kept past `run` so upstream never sees a closed relay; whatever is left is counted.
                let leftover_rx = stage_input.clone();
                // `out_tx` is dropped when `run` returns, closing the next relay.
                let outcome = stage.run(stage_input, out_tx);
                let leftover = leftover_rx.iter().count();
                debug!("{}: finished", label);
                outcome?;
                if leftover > 0 {
                    anyhow::bail!("{label} left {leftover} items unconsumed");
                }
                Ok(())
            });
            handles.push((name, handle));
        }

        // Drain the terminal relay while stages run so the last stage never blocks on it.
        let terminal = drain(&input);
        drop(input);

        join_stage_handles(handles)?;
        debug!("pipeline: {} terminal values", terminal.len());
        Ok(terminal)
    })
}
