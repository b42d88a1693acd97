/// CLI error types with associated exit codes.
///
/// [`CliError`] is the top-level error type for the `lsifcheck` binary.
/// Every variant maps to a stable exit code via [`CliError::exit_code`]:
///
/// - Exit code **2** — the tool could not start validating at all: the dump
///   file is missing or unreadable, or the embedded schema asset is broken.
/// - Exit code **1** — validation ran and the dump is not clean, or the
///   reader failed mid-stream (in which case validation is partial and the
///   graph phase was skipped).
use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// CliError
// ---------------------------------------------------------------------------

/// All error conditions the `lsifcheck` CLI can produce.
///
/// Use [`CliError::exit_code`] for the process exit code and
/// [`CliError::message`] for the stderr line printed before exiting.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: could not start ---
    /// The dump file could not be found on the filesystem.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read the dump file.
    PermissionDenied {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// A generic I/O error occurred while opening the dump file.
    Io {
        /// A human-readable label for the source.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// The embedded LSIF JSON Schema failed to load or compile.
    ///
    /// This indicates a packaging bug in `lsifcheck` itself, not a problem
    /// with the dump.
    SchemaAsset {
        /// The underlying compilation error message.
        detail: String,
    },

    // --- Exit code 1: validation outcomes ---
    /// The reader failed mid-stream (oversized line, invalid UTF-8, read
    /// error). Errors collected so far were reported; validation is partial.
    Reader {
        /// 1-based number of the line that could not be read.
        line: usize,
        /// Description of the reader failure.
        detail: String,
    },

    /// Validation ran and found errors. The report has already been printed;
    /// this variant exists so `main` can exit with code 1 cleanly.
    Invalid {
        /// Number of errors reported.
        errors: usize,
    },
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::Io { .. }
            | Self::SchemaAsset { .. } => 2,

            Self::Reader { .. } | Self::Invalid { .. } => 1,
        }
    }

    /// Returns the human-readable error line printed to stderr.
    pub fn message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("error: file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                format!("error: permission denied: {}", path.display())
            }
            Self::Io { source, detail } => {
                format!("error: I/O error reading {source}: {detail}")
            }
            Self::SchemaAsset { detail } => {
                format!("error: embedded LSIF schema is broken (please report): {detail}")
            }
            Self::Reader { line, detail } => {
                format!("error: failed to read line #{line}: {detail}")
            }
            Self::Invalid { errors: 1 } => "error: validation failed with 1 error".to_owned(),
            Self::Invalid { errors } => {
                format!("error: validation failed with {errors} errors")
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn startup_failures_exit_2() {
        let error = CliError::FileNotFound {
            path: PathBuf::from("missing.lsif"),
        };
        assert_eq!(error.exit_code(), 2);

        let error = CliError::SchemaAsset {
            detail: "bad schema".to_owned(),
        };
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn validation_outcomes_exit_1() {
        assert_eq!(CliError::Invalid { errors: 3 }.exit_code(), 1);
        assert_eq!(
            CliError::Reader {
                line: 7,
                detail: "line exceeds buffer capacity".to_owned(),
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn invalid_message_pluralizes() {
        assert_eq!(
            CliError::Invalid { errors: 1 }.message(),
            "error: validation failed with 1 error"
        );
        assert_eq!(
            CliError::Invalid { errors: 2 }.message(),
            "error: validation failed with 2 errors"
        );
    }

    #[test]
    fn reader_message_names_the_line() {
        let message = CliError::Reader {
            line: 12,
            detail: "line exceeds buffer capacity (1024 bytes)".to_owned(),
        }
        .message();
        assert!(message.contains("line #12"), "{message}");
    }
}
