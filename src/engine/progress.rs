//! Batch progress observation
//!
//! The tracker polls the batch on a fixed interval and reports how many
//! handles have completed. Handle completion cannot wake the tracker, so
//! polling is the mechanism, matching the dialog-timer design this engine is
//! consumed by. Samples flow one way, engine to observer, through a single
//! observer registered at start.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crate::engine::executor::ProcessHandle;

/// Default sampling interval
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Receives (completed, total) samples from a running tracker
pub trait ProgressObserver: Send + Sync {
    fn on_sample(&self, completed: usize, total: usize);
}

/// Polling progress tracker for one batch
pub struct ProgressTracker {
    handles: Vec<Arc<ProcessHandle>>,
    stop: Arc<AtomicBool>,
    sampler: Option<JoinHandle<()>>,
}

impl ProgressTracker {
    /// Begin sampling `handles` on the default interval
    pub fn start(handles: &[Arc<ProcessHandle>], observer: Arc<dyn ProgressObserver>) -> Self {
        Self::start_with_interval(handles, observer, DEFAULT_POLL_INTERVAL)
    }

    /// Begin sampling `handles` every `interval`
    pub fn start_with_interval(
        handles: &[Arc<ProcessHandle>],
        observer: Arc<dyn ProgressObserver>,
        interval: Duration,
    ) -> Self {
        let handles = handles.to_vec();
        let stop = Arc::new(AtomicBool::new(false));

        let sampler = {
            let handles = handles.clone();
            let stop = stop.clone();
            std::thread::spawn(move || {
                let total = handles.len();
                while !stop.load(Ordering::SeqCst) {
                    let completed = count_completed(&handles);
                    observer.on_sample(completed, total);
                    std::thread::sleep(interval);
                }
            })
        };

        Self {
            handles,
            stop,
            sampler: Some(sampler),
        }
    }

    /// Current (completed, total) counts, read directly from the handles
    pub fn snapshot(&self) -> (usize, usize) {
        (count_completed(&self.handles), self.handles.len())
    }

    /// Halt sampling; safe to call more than once
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(sampler) = self.sampler.take() {
            let _ = sampler.join();
        }
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.stop();
    }
}

fn count_completed(handles: &[Arc<ProcessHandle>]) -> usize {
    handles.iter().filter(|h| h.is_completed()).count()
}

/// Console observer printing an in-place "N of M" line
pub struct ConsoleProgressObserver;

impl ProgressObserver for ConsoleProgressObserver {
    fn on_sample(&self, completed: usize, total: usize) {
        print!("\rProcessing: {} of {} completed", completed, total);
        use std::io::Write;
        let _ = std::io::stdout().flush();
    }
}

/// Observer emitting one JSON object per sample for structured consumers
pub struct JsonProgressObserver;

impl ProgressObserver for JsonProgressObserver {
    fn on_sample(&self, completed: usize, total: usize) {
        let event = serde_json::json!({
            "event": "progress",
            "completed": completed,
            "total": total,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });
        println!("{}", event);
    }
}
