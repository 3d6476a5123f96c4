//! Retention sweeper: deletes a stream's files once their embedded date falls
//! outside the retention window. Cleanup is advisory housekeeping and never
//! sits on the write path, so every error in here is swallowed.

use std::fs;
use std::path::Path;

use chrono::{Days, NaiveDate};
use regex::Regex;

use crate::format;

/// Delete files named `{prefix}_{YYYYMMDD}.txt` under `dir` whose date is
/// strictly older than `today - retention_days`.
///
/// A non-positive `retention_days` disables deletion. Directory-listing
/// errors and per-file deletion errors are ignored.
pub(crate) fn sweep(dir: &Path, prefix: &str, retention_days: i32, today: NaiveDate) {
    if retention_days <= 0 {
        return;
    }
    let Some(cutoff) = today.checked_sub_days(Days::new(retention_days as u64)) else {
        return;
    };
    let cutoff = format::date_stamp(cutoff);

    let pattern = format!(
        r"^{}_(\d{{8}})\.{}$",
        regex::escape(prefix),
        format::FILE_EXT
    );
    let Ok(name_re) = Regex::new(&pattern) else {
        return;
    };

    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let Some(captures) = name_re.captures(name) else {
            continue;
        };
        // Fixed-width YYYYMMDD, so lexicographic order is date order.
        if &captures[1] < cutoff.as_str() {
            if fs::remove_file(entry.path()).is_ok() {
                tracing::info!(file = name, "deleted expired log file");
            }
        }
    }
}
