//! Stream factory and handle: the public surface of the engine.
//!
//! `LogStream::try_spawn` wires up one named stream: it creates the
//! directory, sweeps expired files, opens today's file, and starts the
//! background worker. Producers then call `emit`/`blocking_emit` from any
//! number of tasks or threads; `shutdown` drains the queue and closes the
//! file before returning.

use std::path::PathBuf;
use std::process;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio::sync::mpsc::{self, Sender};
use tokio::task::JoinHandle;

use crate::clock::{Clock, SystemClock};
use crate::config::StreamConfig;
use crate::retention;
use crate::rotate::Rotator;
use crate::worker::Worker;

/// Irrecoverable setup failure from the stream factory.
#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("failed to create log directory {dir}: {source}")]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to open initial log file {path}: {source}")]
    OpenFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Handle to one running log stream.
///
/// Dropping the handle without calling [`LogStream::shutdown`] abandons any
/// still-buffered lines beyond the last periodic flush.
pub struct LogStream {
    prefix: String,
    tx: Mutex<Option<Sender<String>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl LogStream {
    /// Start a stream, failing fast: any setup error is reported and the
    /// process exits. A log writer that cannot guarantee a sink must not let
    /// the rest of the system run unobserved.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(config: StreamConfig) -> Self {
        match Self::try_spawn(config) {
            Ok(stream) => stream,
            Err(err) => {
                tracing::error!(error = %err, "log stream initialization failed");
                process::exit(1);
            }
        }
    }

    /// Start a stream, surfacing setup failures to the caller instead of
    /// exiting.
    pub fn try_spawn(config: StreamConfig) -> Result<Self, SpawnError> {
        Self::try_spawn_with_clock(config, Arc::new(SystemClock))
    }

    /// As [`LogStream::try_spawn`], with an injected time source. Lets tests
    /// drive rotation across a simulated midnight.
    pub fn try_spawn_with_clock(
        config: StreamConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, SpawnError> {
        std::fs::create_dir_all(&config.dir).map_err(|source| SpawnError::CreateDir {
            dir: config.dir.clone(),
            source,
        })?;

        let today = clock.now().date_naive();

        // One synchronous sweep before any traffic is accepted.
        retention::sweep(&config.dir, &config.prefix, config.retention_days, today);

        let mut rotator = Rotator::new(&config.dir, &config.prefix);
        let stamp = crate::format::date_stamp(today);
        rotator.open(&stamp).map_err(|source| SpawnError::OpenFile {
            path: rotator.current_path(&stamp),
            source,
        })?;

        let (tx, rx) = mpsc::channel(config.queue_capacity);
        let worker = Worker::new(
            rx,
            rotator,
            clock,
            config.flush_interval,
            config.dir.clone(),
            config.prefix.clone(),
            config.retention_days,
        );
        let handle = tokio::spawn(worker.run());

        tracing::info!(
            stream = %config.prefix,
            dir = %config.dir.display(),
            retention_days = config.retention_days,
            "log stream started"
        );

        Ok(Self {
            prefix: config.prefix,
            tx: Mutex::new(Some(tx)),
            worker: Mutex::new(Some(handle)),
        })
    }

    /// Queue one rendered line. Blocks (asynchronously) while the queue is at
    /// capacity: under sustained overload producers slow to disk throughput
    /// rather than losing data. Never fails observably; lines offered after
    /// shutdown are discarded.
    pub async fn emit(&self, line: String) {
        let Some(tx) = self.sender() else { return };
        let _ = tx.send(line).await;
    }

    /// [`LogStream::emit`] for plain threads: blocks the calling thread while
    /// the queue is full. Must not be called from within an async context.
    pub fn blocking_emit(&self, line: String) {
        let Some(tx) = self.sender() else { return };
        let _ = tx.blocking_send(line);
    }

    /// Close the queue and block until the worker has consumed every
    /// already-accepted line, flushed the buffer, and closed the file.
    ///
    /// Safe to call again afterwards (a no-op), but has no timeout: a worker
    /// wedged on a permanently failing filesystem wedges its caller too.
    pub async fn shutdown(&self) {
        if let Ok(mut slot) = self.tx.lock() {
            // Dropping the sender closes the producer side of the queue.
            slot.take();
        }

        let handle = match self.worker.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        };
        let Some(handle) = handle else { return };

        if let Err(err) = handle.await {
            if err.is_panic() {
                tracing::error!(stream = %self.prefix, "log worker had died from a fault");
            }
        }
        tracing::info!(stream = %self.prefix, "log stream closed");
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn sender(&self) -> Option<Sender<String>> {
        self.tx.lock().ok().and_then(|slot| slot.clone())
    }
}

/// Render a format template and arguments and queue the line on a stream.
///
/// Expands to a future; `.await` it:
///
/// ```ignore
/// daylog::emit!(stream, "Hello {}", 5).await;
/// ```
#[macro_export]
macro_rules! emit {
    ($stream:expr, $($arg:tt)+) => {
        $stream.emit(::std::format!($($arg)+))
    };
}
