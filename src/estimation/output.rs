//! θ and dzA output streams.
//!
//! Both streams are append-only text files of space-separated numeric
//! rows: a header line naming the columns, then one row per emitted
//! iteration whose first column is the signed iteration index `t`
//! (Algorithm S emits `t = -M₁ .. -1`, Algorithm EE continues from 0).
//! Rows are buffered and flushed once per EE outer iteration, which is the
//! restart granularity promised to downstream tooling.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::io::errors::{FileResult, NetworkFileError};

/// One buffered output stream with its path kept for error reporting.
#[derive(Debug)]
pub struct OutputStream {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl OutputStream {
    /// Create (truncate) the file at `path`.
    pub fn create(path: &Path) -> FileResult<OutputStream> {
        let file = File::create(path).map_err(|e| NetworkFileError::io(path, e))?;
        Ok(OutputStream { writer: BufWriter::new(file), path: path.to_path_buf() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the space-separated header line.
    pub fn write_header<'a>(&mut self, columns: impl Iterator<Item = &'a str>) -> FileResult<()> {
        let line = columns.collect::<Vec<&str>>().join(" ");
        writeln!(self.writer, "{line}").map_err(|e| NetworkFileError::io(&self.path, e))
    }

    /// Write one numeric row: the iteration index followed by the values.
    pub fn write_row(&mut self, t: i64, values: &[f64]) -> FileResult<()> {
        let io_err = |e| NetworkFileError::io(&self.path, e);
        write!(self.writer, "{t}").map_err(io_err)?;
        for value in values {
            write!(self.writer, " {value}").map_err(io_err)?;
        }
        writeln!(self.writer).map_err(io_err)
    }

    pub fn flush(&mut self) -> FileResult<()> {
        self.writer.flush().map_err(|e| NetworkFileError::io(&self.path, e))
    }
}
