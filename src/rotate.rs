//! File rotator: owns the single open output file and its write buffer.
//!
//! Ownership is exclusive to the worker task; producers never touch the file.
//! Rotation is lazy: the date check runs once per arriving message, so a
//! stream that is idle across midnight keeps appending to the previous day's
//! file until traffic resumes.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::format;

pub(crate) struct Rotator {
    dir: PathBuf,
    prefix: String,
    /// Date stamp (YYYYMMDD) of the open file; `None` until the first
    /// successful open and after a failed one, which arms the retry on the
    /// next message.
    current_date: Option<String>,
    writer: Option<BufWriter<File>>,
}

impl Rotator {
    pub(crate) fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            current_date: None,
            writer: None,
        }
    }

    pub(crate) fn current_path(&self, date_stamp: &str) -> PathBuf {
        self.dir.join(format::file_name(&self.prefix, date_stamp))
    }

    /// Open the append-mode file for `date_stamp`, creating the directory if
    /// something removed it since construction. An existing file for the same
    /// date is appended to, never truncated.
    pub(crate) fn open(&mut self, date_stamp: &str) -> io::Result<()> {
        let _ = std::fs::create_dir_all(&self.dir);

        let path = self.current_path(date_stamp);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        self.writer = Some(BufWriter::new(file));
        self.current_date = Some(date_stamp.to_string());
        Ok(())
    }

    /// Make sure the open file matches `today`, rotating if it does not.
    ///
    /// Returns `Ok(true)` when a new file was opened (first open or date
    /// change). On failure the rotator is left closed so the next message
    /// retries; the caller reports the loss and moves on.
    pub(crate) fn ensure_open(&mut self, today: &str) -> io::Result<bool> {
        if self.writer.is_some() && self.current_date.as_deref() == Some(today) {
            return Ok(false);
        }
        self.close();
        self.open(today)?;
        Ok(true)
    }

    /// Append one rendered line. Only valid after a successful `ensure_open`.
    pub(crate) fn append_line(&mut self, line: &str) -> io::Result<()> {
        match self.writer.as_mut() {
            Some(writer) => writeln!(writer, "{line}"),
            None => Err(io::Error::new(io::ErrorKind::NotConnected, "no open file")),
        }
    }

    pub(crate) fn has_buffered(&self) -> bool {
        self.writer
            .as_ref()
            .map(|w| !w.buffer().is_empty())
            .unwrap_or(false)
    }

    pub(crate) fn flush(&mut self) -> io::Result<()> {
        match self.writer.as_mut() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }

    /// Flush and drop the open file, if any.
    pub(crate) fn close(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
        self.current_date = None;
    }

    /// Best-effort flush plus durability sync, used on the panic path where
    /// nothing further can be done with an error.
    pub(crate) fn emergency_sync(&mut self) {
        if let Some(writer) = self.writer.as_mut() {
            let _ = writer.flush();
            let _ = writer.get_ref().sync_all();
        }
    }
}
