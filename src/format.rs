//! File naming and on-disk line rendering shared by the rotator and the
//! retention sweeper. One line per message, plain text, no escaping.

use chrono::{DateTime, Local, NaiveDate};

pub(crate) const FILE_EXT: &str = "txt";

/// Compact calendar date used in file names, e.g. `20250301`.
pub(crate) fn date_stamp(date: NaiveDate) -> String {
    date.format("%Y%m%d").to_string()
}

/// Name of the output file for `prefix` on the day identified by `date_stamp`.
pub(crate) fn file_name(prefix: &str, date_stamp: &str) -> String {
    format!("{prefix}_{date_stamp}.{FILE_EXT}")
}

/// Render a message into its on-disk form: `[YYYY-MM-DD HH:MM:SS] <msg>`.
/// The trailing newline is added by the writer.
pub(crate) fn render_line(now: DateTime<Local>, msg: &str) -> String {
    format!("[{}] {}", now.format("%Y-%m-%d %H:%M:%S"), msg)
}
