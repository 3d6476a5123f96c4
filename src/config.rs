use std::path::PathBuf;
use std::time::Duration;

/// Bounded queue capacity between producers and the worker.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1000;

/// Interval of the periodic buffer flush in the worker loop.
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(2);

/// Immutable per-stream configuration consumed by the stream factory
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Root folder for this stream's files; created recursively if absent.
    pub dir: PathBuf,
    /// Identifies this stream's files among others sharing the directory.
    pub prefix: String,
    /// Files older than this many days are deleted; zero or negative
    /// disables retention entirely.
    pub retention_days: i32,
    /// Capacity of the producer queue; full means producers block.
    pub queue_capacity: usize,
    /// How often the worker flushes buffered bytes to the file.
    pub flush_interval: Duration,
}

impl StreamConfig {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>, retention_days: i32) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            retention_days,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
        }
    }

    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval = interval;
        self
    }
}
