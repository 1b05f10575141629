use anyhow::Result;
use std::any::Any;
use std::thread::ScopedJoinHandle;

/// Join every stage thread, then report failures together.
///
/// All handles are joined before anything is returned, so a failed stage never leaves siblings
/// running. Any panic or returned error turns the run into an error listing each failed stage.
pub fn join_stage_handles(
    handles: Vec<(String, ScopedJoinHandle<'_, Result<()>>)>,
) -> Result<()> {
    let mut failed = Vec::new();
    for (name, h) in handles {
        match h.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                log::error!("stage {} failed: {:#}", name, e);
                failed.push(format!("{name}: {e:#}"));
            }
            Err(payload) => {
                let msg = panic_message(payload.as_ref());
                log::error!("stage {} panicked: {}", name, msg);
                failed.push(format!("{name} panicked: {msg}"));
            }
        }
    }
    if !failed.is_empty() {
        anyhow::bail!("{} stage(s) failed: {}", failed.len(), failed.join(", "));
    }
    Ok(())
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
