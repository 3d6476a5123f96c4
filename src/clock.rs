use chrono::{DateTime, Local};

/// Source of wall-clock time for the worker and the rotator.
///
/// The engine only ever asks "what time is it now"; abstracting that single
/// question lets tests drive the rotation state machine across a simulated
/// midnight without waiting for a real one.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Local>;
}

/// Production clock backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
