//! Explicit registry of named streams, constructed once at startup and passed
//! by reference to callers. Replaces ambient per-stream globals with
//! dependency injection while keeping the "log from anywhere" ergonomics.

use crate::stream::LogStream;

#[derive(Default)]
pub struct Registry {
    streams: Vec<(String, LogStream)>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stream under `name`. Registration order is the shutdown
    /// order, reversed.
    pub fn register(&mut self, name: impl Into<String>, stream: LogStream) {
        self.streams.push((name.into(), stream));
    }

    pub fn get(&self, name: &str) -> Option<&LogStream> {
        self.streams
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, s)| s)
    }

    /// Shut every stream down, most recently registered first, blocking until
    /// each one has fully drained.
    pub async fn shutdown_all(&self) {
        for (_, stream) in self.streams.iter().rev() {
            stream.shutdown().await;
        }
    }
}
