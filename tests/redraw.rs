mod common;

use asciibar::ProgressBar;
use common::{wait_for, Recorder};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const TICK: Duration = Duration::from_millis(5);
const PATIENCE: Duration = Duration::from_secs(5);

/// Wait well past the point where the redraw thread should have exited, and
/// confirm that nothing more is written.
fn assert_settled(rec: &Recorder) {
    thread::sleep(TICK * 10);
    let settled = rec.count();
    thread::sleep(TICK * 10);
    assert_eq!(settled, rec.count(), "redraw thread is still drawing");
}

#[test]
fn draws_immediately() {
    let rec = Recorder::default();
    let bar = ProgressBar::new(rec.clone(), 10);
    bar.draw_every(Duration::from_secs(60));

    assert!(wait_for(PATIENCE, || rec.count() >= 1));
    assert!(rec.lines()[0].ends_with("] 0%"));

    // The thread exits after its next wake-up.
    bar.increment_by(10);
}

#[test]
fn stops_once_complete() {
    let rec = Recorder::default();
    let bar = ProgressBar::new(rec.clone(), 10);
    bar.draw_every(TICK);

    for _ in 0..10 {
        bar.increment();
        thread::sleep(TICK);
    }

    assert!(wait_for(PATIENCE, || rec.count() >= 2));
    assert_settled(&rec);

    for line in rec.lines() {
        assert!(line.starts_with("\r["));
        assert!(!line.contains('\n'));
    }
}

#[test]
fn already_complete_draws_once() {
    let rec = Recorder::default();
    let bar = ProgressBar::new(rec.clone(), 3);
    bar.increment_by(3);
    bar.draw_every(TICK);

    assert!(wait_for(PATIENCE, || rec.count() >= 1));
    assert_settled(&rec);

    let lines = rec.lines();
    assert_eq!(1, lines.len());
    assert!(lines[0].ends_with("] 100%"));
}

#[test]
fn stops_when_asked() {
    let rec = Recorder::default();
    let bar = ProgressBar::new(rec.clone(), 10);
    let stop = Arc::new(AtomicBool::new(false));
    bar.draw_every_until(TICK, stop.clone());

    bar.increment();
    assert!(wait_for(PATIENCE, || rec.count() >= 3));

    stop.store(true, Ordering::Release);
    assert_settled(&rec);
    assert!(!bar.completed());
}

#[test]
fn keeps_drawing_until_complete() {
    let rec = Recorder::default();
    let bar = ProgressBar::new(rec.clone(), 2);
    bar.draw_every(TICK);

    bar.increment();
    let before = rec.count();
    assert!(wait_for(PATIENCE, || rec.count() >= before + 3));

    bar.increment();
    assert_settled(&rec);
}
