//! Row-at-a-time CSV output.
//!
//! Fetch runs are long and talk to remote services, so every row is flushed
//! as soon as it is written; an interrupted run keeps everything fetched so far.

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{OutputError, Result};

/// What to do when the output file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExistingFile {
    /// Refuse to touch it.
    #[default]
    Fail,
    /// Truncate and start over with a fresh header.
    Overwrite,
    /// Append rows; the existing header is kept as is.
    Append,
}

impl ExistingFile {
    /// `force` wins over `extend`.
    pub fn from_flags(force: bool, extend: bool) -> Self {
        if force {
            Self::Overwrite
        } else if extend {
            Self::Append
        } else {
            Self::Fail
        }
    }
}

/// CSV writer bound to one output file and header.
pub struct CsvSink {
    writer: csv::Writer<File>,
    path: PathBuf,
    header: Vec<String>,
    rows_written: usize,
}

impl CsvSink {
    /// Open `path` for writing rows with the given header.
    ///
    /// A header line is written whenever the file is created or truncated.
    pub fn open<S: AsRef<str>>(path: &Path, header: &[S], mode: ExistingFile) -> Result<Self> {
        let header: Vec<String> = header.iter().map(|h| h.as_ref().to_string()).collect();
        let exists = path.exists();

        let (file, write_header) = match (exists, mode) {
            (false, _) | (true, ExistingFile::Overwrite) => {
                let file = File::create(path).map_err(|e| OutputError::io(path, e))?;
                (file, true)
            }
            (true, ExistingFile::Append) => {
                let file = OpenOptions::new()
                    .append(true)
                    .open(path)
                    .map_err(|e| OutputError::io(path, e))?;
                (file, false)
            }
            (true, ExistingFile::Fail) => {
                return Err(OutputError::AlreadyExists {
                    path: path.to_path_buf(),
                });
            }
        };
        debug!(path = %path.display(), ?mode, write_header, "opened CSV output");

        let mut sink = Self {
            writer: csv::Writer::from_writer(file),
            path: path.to_path_buf(),
            header,
            rows_written: 0,
        };
        if write_header {
            sink.writer
                .write_record(&sink.header)
                .map_err(|e| OutputError::csv(sink.origin(), e))?;
            sink.flush()?;
        }
        Ok(sink)
    }

    /// Write one row whose values are in header order.
    pub fn write_row<S: AsRef<[u8]>>(&mut self, row: &[S]) -> Result<()> {
        if row.len() != self.header.len() {
            return Err(OutputError::RowWidth {
                path: self.path.clone(),
                expected: self.header.len(),
                actual: row.len(),
            });
        }
        self.writer
            .write_record(row)
            .map_err(|e| OutputError::csv(self.origin(), e))?;
        self.flush()?;
        self.rows_written += 1;
        Ok(())
    }

    /// Write one row from a column-to-value map; unknown keys are ignored and
    /// absent columns are left empty.
    pub fn write_map(&mut self, values: &BTreeMap<String, String>) -> Result<()> {
        let row: Vec<&str> = self
            .header
            .iter()
            .map(|column| values.get(column).map_or("", String::as_str))
            .collect();
        self.write_row(&row)
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows written through this sink (the header is not counted).
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Flush and close, returning the number of rows written.
    pub fn finish(mut self) -> Result<usize> {
        self.flush()?;
        Ok(self.rows_written)
    }

    fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| OutputError::io(&self.path, e))
    }

    fn origin(&self) -> String {
        self.path.display().to_string()
    }
}
