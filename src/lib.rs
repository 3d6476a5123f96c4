//! daylog: an asynchronous, crash-resilient file log writer.
//!
//! Each named stream decouples any number of concurrent producers from one
//! append-only destination file through a bounded queue and a single
//! background worker. The worker rotates the file daily (lazily, on the next
//! message after midnight), purges files older than a retention window, and
//! flushes buffered bytes every two seconds.
//!
//! ```ignore
//! let mut registry = daylog::Registry::new();
//! registry.register(
//!     "app",
//!     daylog::LogStream::spawn(daylog::StreamConfig::new("./logs", "AppLog", 60)),
//! );
//!
//! daylog::emit!(registry.get("app").unwrap(), "started job {}", 7).await;
//!
//! registry.shutdown_all().await;
//! ```

mod clock;
mod config;
mod format;
mod registry;
mod retention;
mod rotate;
mod stream;
mod worker;

pub use clock::{Clock, SystemClock};
pub use config::{DEFAULT_FLUSH_INTERVAL, DEFAULT_QUEUE_CAPACITY, StreamConfig};
pub use registry::Registry;
pub use stream::{LogStream, SpawnError};
