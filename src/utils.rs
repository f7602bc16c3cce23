// Utility functions
use crate::model::{AppError, RecordError};
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Parses an RFC 3339 timestamp into `DateTime<Utc>`, if possible.
pub fn parse_datetime(date_str: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(date_str.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn open_reader(path: &Path) -> Result<BufReader<File>, AppError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| AppError::io(path, e))
}

pub fn create_writer(path: &Path) -> Result<BufWriter<File>, AppError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| AppError::io(path, e))
}

/// Non-blank lines of a JSON-lines file with their 1-based line numbers.
///
/// A line that is not valid UTF-8 is handed back as a `RecordError` so the
/// caller can decide whether it is fatal. Read failures end the iteration
/// with `AppError::Io`.
pub struct RecordLines<R> {
    reader: R,
    source: PathBuf,
    line_no: usize,
    buf: Vec<u8>,
    done: bool,
}

pub fn record_lines<R: BufRead>(reader: R, source: &Path) -> RecordLines<R> {
    RecordLines {
        reader,
        source: source.to_path_buf(),
        line_no: 0,
        buf: Vec::new(),
        done: false,
    }
}

impl<R: BufRead> Iterator for RecordLines<R> {
    type Item = Result<(usize, Result<String, RecordError>), AppError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line_no += 1;
                    if self.buf.ends_with(b"\n") {
                        self.buf.pop();
                        if self.buf.ends_with(b"\r") {
                            self.buf.pop();
                        }
                    }
                    let text = match String::from_utf8(std::mem::take(&mut self.buf)) {
                        Ok(text) => text,
                        Err(_) => {
                            let err = RecordError::InvalidEncoding { line: self.line_no };
                            return Some(Ok((self.line_no, Err(err))));
                        }
                    };
                    if text.trim().is_empty() {
                        continue;
                    }
                    return Some(Ok((self.line_no, Ok(text))));
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(AppError::io(&self.source, e)));
                }
            }
        }
        None
    }
}
