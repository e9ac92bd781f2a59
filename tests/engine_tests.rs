//! End-to-end engine tests running real processes.
//!
//! These use small well-known binaries (`true`, `false`, `sleep`) in place
//! of the media engine so the batch machinery is exercised without media
//! files.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use batchcut::engine::executor::{ParallelExecutor, ProcessHandle};
use batchcut::engine::progress::{ProgressObserver, ProgressTracker};

fn short_handle() -> Arc<ProcessHandle> {
    Arc::new(ProcessHandle::with_program("true", ""))
}

#[test]
fn run_all_completes_every_handle() {
    let handles: Vec<Arc<ProcessHandle>> = (0..8).map(|_| short_handle()).collect();
    ParallelExecutor::run_all(&handles);
    assert!(handles.iter().all(|h| h.is_completed()));
}

#[test]
fn run_all_with_limit_of_one_still_finishes() {
    let handles: Vec<Arc<ProcessHandle>> = (0..3).map(|_| short_handle()).collect();
    ParallelExecutor::run_all_with_limit(&handles, 1);
    assert!(handles.iter().all(|h| h.is_completed()));
}

#[test]
fn concurrency_limit_bounds_running_processes() {
    let handles: Vec<Arc<ProcessHandle>> = (0..6)
        .map(|_| Arc::new(ProcessHandle::with_program("sleep", "0.2")))
        .collect();

    let started = Instant::now();
    ParallelExecutor::run_all_with_limit(&handles, 2);
    let elapsed = started.elapsed();

    assert!(handles.iter().all(|h| h.is_completed()));
    // Six 200ms sleepers at two per wave need at least three waves; an
    // elapsed time under that floor means the limit was exceeded.
    assert!(elapsed >= Duration::from_millis(550), "elapsed {:?}", elapsed);
}

#[test]
fn run_all_on_empty_batch_returns() {
    ParallelExecutor::run_all(&[]);
}

#[test]
fn nonzero_exit_still_counts_as_completed() {
    // Completion records that the process exited, not that it succeeded.
    let handle = Arc::new(ProcessHandle::with_program("false", ""));
    ParallelExecutor::run_all(&[handle.clone()]);
    assert!(handle.is_completed());
}

#[test]
fn spawn_failure_skips_item_and_batch_continues() {
    let good = short_handle();
    let bad = Arc::new(ProcessHandle::with_program("no-such-binary-batchcut", ""));
    let also_good = short_handle();

    ParallelExecutor::run_all(&[good.clone(), bad.clone(), also_good.clone()]);

    assert!(good.is_completed());
    assert!(!bad.is_completed());
    assert!(also_good.is_completed());
}

#[test]
fn kill_all_interrupts_running_batch() {
    let handles: Vec<Arc<ProcessHandle>> = (0..2)
        .map(|_| Arc::new(ProcessHandle::with_program("sleep", "30")))
        .collect();

    let started = Instant::now();
    let runner = {
        let handles = handles.clone();
        // Explicit limit so both sleepers run at kill time on any host.
        std::thread::spawn(move || ParallelExecutor::run_all_with_limit(&handles, 2))
    };

    // Give the workers time to spawn the sleepers, then pull the plug.
    std::thread::sleep(Duration::from_millis(300));
    ParallelExecutor::kill_all(&handles);
    runner.join().unwrap();

    assert!(
        started.elapsed() < Duration::from_secs(10),
        "batch should end promptly after kill_all, took {:?}",
        started.elapsed()
    );
}

#[test]
fn kill_all_stops_queued_handles_from_starting() {
    // One worker, two long sleepers: the second is still queued when the
    // kill lands and must never be spawned afterwards.
    let handles: Vec<Arc<ProcessHandle>> = (0..2)
        .map(|_| Arc::new(ProcessHandle::with_program("sleep", "30")))
        .collect();

    let started = Instant::now();
    let runner = {
        let handles = handles.clone();
        std::thread::spawn(move || ParallelExecutor::run_all_with_limit(&handles, 1))
    };

    std::thread::sleep(Duration::from_millis(300));
    ParallelExecutor::kill_all(&handles);
    runner.join().unwrap();

    assert!(
        started.elapsed() < Duration::from_secs(10),
        "queued handle must not run after kill_all, took {:?}",
        started.elapsed()
    );
    assert!(!handles[1].is_completed());
}

#[test]
fn kill_all_is_idempotent_after_exit() {
    let handles = vec![short_handle()];
    ParallelExecutor::run_all(&handles);
    // Processes already exited; killing again must not panic.
    ParallelExecutor::kill_all(&handles);
    ParallelExecutor::kill_all(&handles);
    assert!(handles[0].is_completed());
}

struct CountingObserver {
    samples: AtomicUsize,
}

impl ProgressObserver for CountingObserver {
    fn on_sample(&self, _completed: usize, _total: usize) {
        self.samples.fetch_add(1, Ordering::SeqCst);
    }
}

#[test]
fn tracker_observes_live_batch_to_completion() {
    let handles: Vec<Arc<ProcessHandle>> = (0..4).map(|_| short_handle()).collect();

    let observer = Arc::new(CountingObserver {
        samples: AtomicUsize::new(0),
    });
    let mut tracker = ProgressTracker::start_with_interval(
        &handles,
        observer.clone(),
        Duration::from_millis(10),
    );

    ParallelExecutor::run_all(&handles);
    std::thread::sleep(Duration::from_millis(50));
    tracker.stop();

    assert_eq!(tracker.snapshot(), (4, 4));
    assert!(observer.samples.load(Ordering::SeqCst) > 0);

    // A second stop is a no-op.
    tracker.stop();
}
