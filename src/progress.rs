//! # Progress — Search Progress Counters and Stop Signal
//!
//! Counters shared between the search driver and a background status reporter.
//! The driver is single-threaded and updates the counters once per block; the
//! reporter thread only reads them. Atomics keep the reader lock-free, and a
//! Mutex guards the current-block label (written once per block).
//!
//! ## Background Reporter
//!
//! `start_reporter` spawns a thread that logs a `search progress` event at a
//! fixed interval: tested count, found count, blocks scored, rate and elapsed
//! time. `stop()` ends it at the next wake-up; unpark the reporter's thread
//! to wake it immediately.
//!
//! ## Stop Requests
//!
//! `request_stop()` asks the driver to return after the block in flight. The
//! frequency model is only touched at the end of a block, so the partial
//! report and model are always consistent.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

pub struct Progress {
    pub tested: AtomicU64,
    pub found: AtomicU64,
    pub blocks: AtomicU64,
    pub current: Mutex<String>,
    start: Instant,
    shutdown: AtomicBool,
    stop_requested: AtomicBool,
}

impl Progress {
    pub fn new() -> Arc<Self> {
        Arc::new(Progress {
            tested: AtomicU64::new(0),
            found: AtomicU64::new(0),
            blocks: AtomicU64::new(0),
            current: Mutex::new(String::new()),
            start: Instant::now(),
            shutdown: AtomicBool::new(false),
            stop_requested: AtomicBool::new(false),
        })
    }

    /// Record one scored block.
    pub fn record_block(&self, label: String, tested: u64, found: u64) {
        self.tested.fetch_add(tested, Ordering::Relaxed);
        self.found.fetch_add(found, Ordering::Relaxed);
        self.blocks.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut current) = self.current.lock() {
            *current = label;
        }
    }

    pub fn start_reporter(self: &Arc<Self>, interval: Duration) -> thread::JoinHandle<()> {
        let progress = Arc::clone(self);
        thread::spawn(move || loop {
            thread::park_timeout(interval);
            if progress.shutdown.load(Ordering::Relaxed) {
                break;
            }
            progress.print_status();
        })
    }

    pub fn print_status(&self) {
        let elapsed = self.start.elapsed();
        let tested = self.tested.load(Ordering::Relaxed);
        let found = self.found.load(Ordering::Relaxed);
        let blocks = self.blocks.load(Ordering::Relaxed);
        let current = self
            .current
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default();
        let rate = if elapsed.as_secs() > 0 {
            tested as f64 / elapsed.as_secs_f64()
        } else {
            0.0
        };
        let h = elapsed.as_secs() / 3600;
        let m = (elapsed.as_secs() % 3600) / 60;
        let s = elapsed.as_secs() % 60;
        info!(
            current = %current,
            tested,
            found,
            blocks,
            rate = format_args!("{:.2}", rate),
            elapsed = format_args!("{:02}:{:02}:{:02}", h, m, s),
            "search progress"
        );
    }

    /// Stop the background reporter.
    pub fn stop(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Ask the driver to return after the current block.
    pub fn request_stop(&self) {
        self.stop_requested.store(true, Ordering::Relaxed);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested.load(Ordering::Relaxed)
    }
}
