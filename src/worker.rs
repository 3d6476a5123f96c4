//! Background worker: the single consumer of a stream's queue.
//!
//! The loop selects between two event sources, a delivered message and a
//! periodic flush tick. Message handling runs inside a panic boundary that
//! performs a best-effort flush and durability sync before letting the worker
//! die; a stream killed that way is never restarted.

use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tokio::sync::mpsc::Receiver;
use tokio::time::MissedTickBehavior;

use crate::clock::Clock;
use crate::format;
use crate::retention;
use crate::rotate::Rotator;

#[derive(Debug, Clone, Copy)]
enum Lifecycle {
    Running,
    Draining,
    Closed,
}

pub(crate) struct Worker {
    rx: Receiver<String>,
    rotator: Rotator,
    clock: Arc<dyn Clock>,
    flush_interval: Duration,
    lifecycle: Lifecycle,
    // Retained for the asynchronous sweep after each rotation.
    dir: PathBuf,
    prefix: String,
    retention_days: i32,
}

impl Worker {
    pub(crate) fn new(
        rx: Receiver<String>,
        rotator: Rotator,
        clock: Arc<dyn Clock>,
        flush_interval: Duration,
        dir: PathBuf,
        prefix: String,
        retention_days: i32,
    ) -> Self {
        Self {
            rx,
            rotator,
            clock,
            flush_interval,
            lifecycle: Lifecycle::Running,
            dir,
            prefix,
            retention_days,
        }
    }

    pub(crate) async fn run(mut self) {
        let mut ticker = tokio::time::interval(self.flush_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                msg = self.rx.recv() => match msg {
                    Some(msg) => {
                        let fault = panic::catch_unwind(AssertUnwindSafe(|| {
                            self.handle_message(&msg);
                        }));
                        if fault.is_err() {
                            self.rotator.emergency_sync();
                            self.transition(Lifecycle::Closed);
                            tracing::error!(
                                stream = %self.prefix,
                                "log worker hit an unrecovered fault; stream is dead"
                            );
                            return;
                        }
                    }
                    // Producer side closed and the queue is drained.
                    None => break,
                },
                _ = ticker.tick() => {
                    if self.rotator.has_buffered() {
                        if let Err(err) = self.rotator.flush() {
                            tracing::warn!(stream = %self.prefix, error = %err, "periodic flush failed");
                        }
                    }
                }
            }
        }

        self.transition(Lifecycle::Draining);
        self.rotator.close();
        self.transition(Lifecycle::Closed);
        tracing::debug!(stream = %self.prefix, "log worker drained and closed");
    }

    fn transition(&mut self, next: Lifecycle) {
        tracing::trace!(stream = %self.prefix, from = ?self.lifecycle, to = ?next, "lifecycle");
        self.lifecycle = next;
    }

    /// Rotation check plus append for one message. Open failures are reported
    /// and drop exactly this message; the next one retries the open.
    fn handle_message(&mut self, msg: &str) {
        let now = self.clock.now();
        let today = format::date_stamp(now.date_naive());

        match self.rotator.ensure_open(&today) {
            Ok(rotated) => {
                if rotated {
                    tracing::info!(
                        stream = %self.prefix,
                        file = %self.rotator.current_path(&today).display(),
                        "opened log file"
                    );
                    self.spawn_sweep(now.date_naive());
                }
            }
            Err(err) => {
                tracing::error!(
                    stream = %self.prefix,
                    error = %err,
                    "failed to open log file, will retry on next message"
                );
                tracing::warn!(stream = %self.prefix, "unsaved log line: {msg}");
                return;
            }
        }

        if let Err(err) = self
            .rotator
            .append_line(&format::render_line(now, msg))
        {
            tracing::error!(stream = %self.prefix, error = %err, "failed to append log line");
            tracing::warn!(stream = %self.prefix, "unsaved log line: {msg}");
        }
    }

    /// Retention runs off the write path after a successful rotation.
    fn spawn_sweep(&self, today: NaiveDate) {
        let dir = self.dir.clone();
        let prefix = self.prefix.clone();
        let retention_days = self.retention_days;
        tokio::task::spawn_blocking(move || {
            retention::sweep(&dir, &prefix, retention_days, today);
        });
    }
}
