/// Capacity-bounded line reading for LSIF dumps.
///
/// This module is the single entry point for input I/O in the `lsifcheck`
/// binary; `lsifcheck-core` never touches the filesystem. The reader hands
/// out one line at a time and enforces the configured buffer capacity while
/// filling, so an oversized line surfaces as a [`ReadError`] before it is
/// ever fully buffered — never as a silent truncation.
use std::fs::File;
use std::io::{BufRead as _, BufReader, ErrorKind};
use std::path::Path;

use crate::error::CliError;

// ---------------------------------------------------------------------------
// ReadError
// ---------------------------------------------------------------------------

/// A failure while reading the next dump line.
///
/// Reader failures abort phase 1; the caller reports the errors collected so
/// far plus a partial-validation warning.
#[derive(Debug)]
pub enum ReadError {
    /// The line exceeds the configured buffer capacity.
    LineTooLong {
        /// The configured capacity in bytes.
        capacity: usize,
    },
    /// The line is not valid UTF-8.
    InvalidUtf8,
    /// The underlying read failed.
    Io {
        /// The underlying I/O error message.
        detail: String,
    },
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LineTooLong { capacity } => {
                write!(f, "line exceeds buffer capacity ({capacity} bytes)")
            }
            Self::InvalidUtf8 => f.write_str("line is not valid UTF-8"),
            Self::Io { detail } => write!(f, "read failed: {detail}"),
        }
    }
}

impl std::error::Error for ReadError {}

// ---------------------------------------------------------------------------
// LineReader
// ---------------------------------------------------------------------------

/// A buffered dump-file reader that yields one line per call, holding at
/// most `capacity` bytes of the current line.
pub struct LineReader {
    reader: BufReader<File>,
    capacity: usize,
    buffer: Vec<u8>,
    line: usize,
}

impl LineReader {
    /// Opens `path` for line reading with the given buffer capacity.
    ///
    /// # Errors
    ///
    /// Returns a [`CliError`] (exit code 2) when the file cannot be opened.
    pub fn open(path: &Path, capacity: usize) -> Result<Self, CliError> {
        let file = File::open(path).map_err(|error| {
            let kind = error.kind();
            if kind == ErrorKind::NotFound {
                CliError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else if kind == ErrorKind::PermissionDenied {
                CliError::PermissionDenied {
                    path: path.to_path_buf(),
                }
            } else {
                CliError::Io {
                    source: path.display().to_string(),
                    detail: error.to_string(),
                }
            }
        })?;

        Ok(Self {
            reader: BufReader::new(file),
            capacity,
            buffer: Vec::new(),
            line: 0,
        })
    }

    /// Returns the 1-based number of the line a failed read was attempting.
    pub fn current_line(&self) -> usize {
        self.line + 1
    }

    /// Reads the next line, without its terminator. Returns `Ok(None)` at
    /// end of input.
    ///
    /// The capacity check runs while the buffer fills, so a pathological
    /// line costs at most `capacity` bytes of memory before it is rejected.
    pub fn next_line(&mut self) -> Result<Option<String>, ReadError> {
        self.buffer.clear();

        loop {
            let chunk = match self.reader.fill_buf() {
                Ok(chunk) => chunk,
                Err(error) => {
                    return Err(ReadError::Io {
                        detail: error.to_string(),
                    });
                }
            };

            if chunk.is_empty() {
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                // Final line without a trailing newline.
                break;
            }

            match chunk.iter().position(|byte| *byte == b'\n') {
                Some(newline) => {
                    if self.buffer.len() + newline > self.capacity {
                        return Err(ReadError::LineTooLong {
                            capacity: self.capacity,
                        });
                    }
                    self.buffer.extend_from_slice(&chunk[..newline]);
                    self.reader.consume(newline + 1);
                    break;
                }
                None => {
                    let length = chunk.len();
                    if self.buffer.len() + length > self.capacity {
                        return Err(ReadError::LineTooLong {
                            capacity: self.capacity,
                        });
                    }
                    self.buffer.extend_from_slice(chunk);
                    self.reader.consume(length);
                }
            }
        }

        self.line += 1;

        if self.buffer.last() == Some(&b'\r') {
            self.buffer.pop();
        }

        match std::str::from_utf8(&self.buffer) {
            Ok(text) => Ok(Some(text.to_owned())),
            Err(_) => Err(ReadError::InvalidUtf8),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
