//! Relay and fan-out tests: close/drain semantics, backpressure, completeness, pool bound.

use crossbeam_channel::TrySendError;
use signer::pipeline::{closed_relay, drain, relay, run_fan_out};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

// --- relay ---

#[test]
fn test_relay_keeps_buffered_items_after_close() {
    let (tx, rx) = relay(4);
    tx.send("a".to_string()).unwrap();
    tx.send("b".to_string()).unwrap();
    drop(tx);

    assert_eq!(rx.recv().unwrap(), "a");
    assert_eq!(rx.recv().unwrap(), "b");
    assert!(rx.recv().is_err());
    // Closed-and-drained stays observable.
    assert!(rx.recv().is_err());
}

#[test]
fn test_relay_full_blocks_send_until_received() {
    let (tx, rx) = relay(2);
    tx.send("1".to_string()).unwrap();
    tx.send("2".to_string()).unwrap();
    assert!(matches!(
        tx.try_send("3".to_string()),
        Err(TrySendError::Full(_))
    ));

    let producer = thread::spawn(move || tx.send("3".to_string()).is_ok());
    thread::sleep(Duration::from_millis(20));
    assert_eq!(rx.recv().unwrap(), "1");
    assert!(producer.join().unwrap());
    assert_eq!(drain(&rx), vec!["2".to_string(), "3".to_string()]);
}

#[test]
fn test_relay_zero_capacity_still_buffers() {
    let (tx, rx) = relay(0);
    assert!(tx.try_send("only".to_string()).is_ok());
    drop(tx);
    assert_eq!(drain(&rx), vec!["only".to_string()]);
}

#[test]
fn test_closed_relay_is_empty_and_closed() {
    let rx = closed_relay();
    assert!(rx.recv().is_err());
    assert!(drain(&rx).is_empty());
}

#[test]
fn test_drain_preserves_fifo_order() {
    let (tx, rx) = relay(10);
    for i in 0..10 {
        tx.send(i.to_string()).unwrap();
    }
    drop(tx);
    let expected: Vec<String> = (0..10).map(|i| i.to_string()).collect();
    assert_eq!(drain(&rx), expected);
}

// --- run_fan_out ---

/// Feed `n` items on a producer thread and return the input end.
fn feed(n: usize, cap: usize) -> crossbeam_channel::Receiver<String> {
    let (tx, rx) = relay(cap);
    thread::spawn(move || {
        for i in 0..n {
            tx.send(i.to_string()).unwrap();
        }
    });
    rx
}

#[test]
fn test_fan_out_transforms_every_item() -> anyhow::Result<()> {
    let input = feed(250, 8);
    let (out_tx, out_rx) = relay(8);

    let consumer = thread::spawn(move || drain(&out_rx));
    let handled = run_fan_out(input, out_tx, 6, |s| format!("<{s}>"))?;
    let mut got = consumer.join().unwrap();

    assert_eq!(handled, 250);
    got.sort();
    let mut expected: Vec<String> = (0..250).map(|i| format!("<{i}>")).collect();
    expected.sort();
    assert_eq!(got, expected);
    Ok(())
}

#[test]
fn test_fan_out_closes_output_only_after_slow_work_finishes() {
    let input = feed(20, 4);
    let (out_tx, out_rx) = relay(4);
    let done = AtomicUsize::new(0);

    thread::scope(|s| {
        let consumer = s.spawn(|| drain(&out_rx));
        run_fan_out(input, out_tx, 5, |item| {
            thread::sleep(Duration::from_millis(10));
            done.fetch_add(1, Ordering::SeqCst);
            item
        })
        .unwrap();
        let got = consumer.join().unwrap();
        assert_eq!(got.len(), 20);
        assert_eq!(done.load(Ordering::SeqCst), 20);
    });
}

#[test]
fn test_fan_out_respects_worker_bound() {
    let input = feed(60, 60);
    let (out_tx, out_rx) = relay(60);
    let in_flight = AtomicUsize::new(0);
    let peak = AtomicUsize::new(0);

    run_fan_out(input, out_tx, 3, |item| {
        let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        peak.fetch_max(now, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(2));
        in_flight.fetch_sub(1, Ordering::SeqCst);
        item
    })
    .unwrap();

    assert_eq!(drain(&out_rx).len(), 60);
    let peak = peak.load(Ordering::SeqCst);
    assert!((1..=3).contains(&peak), "peak concurrency {peak}");
}

#[test]
fn test_fan_out_zero_workers_runs_one() -> anyhow::Result<()> {
    let input = feed(5, 5);
    let (out_tx, out_rx) = relay(5);
    assert_eq!(run_fan_out(input, out_tx, 0, |s| s)?, 5);
    assert_eq!(drain(&out_rx).len(), 5);
    Ok(())
}

#[test]
fn test_fan_out_on_closed_input_closes_output() -> anyhow::Result<()> {
    let (out_tx, out_rx) = relay(1);
    assert_eq!(run_fan_out(closed_relay(), out_tx, 4, |s| s)?, 0);
    assert!(out_rx.recv().is_err());
    Ok(())
}

#[test]
fn test_fan_out_reports_items_dropped_on_closed_output() {
    let input = feed(40, 4);
    let (out_tx, out_rx) = relay(4);
    drop(out_rx);

    let err = run_fan_out(input, out_tx, 3, |s| s).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("dropped 40 of 40 items"), "{msg}");
}
