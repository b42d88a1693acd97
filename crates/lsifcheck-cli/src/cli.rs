/// Command-line argument definitions for the `lsifcheck` binary.
use std::path::PathBuf;

use clap::Parser;

/// Default line buffer capacity. LSIF producers routinely emit lines of
/// several hundred kilobytes (result sets over large files), so the default
/// is generous; `--buffer-capacity` raises it further when needed.
pub const DEFAULT_BUFFER_CAPACITY: usize = 1024 * 1024;

/// Validate an LSIF dump: per-line structure against the LSIF JSON Schema,
/// then graph-level consistency (reachability, range ownership and
/// disjointness, item-edge ownership).
#[derive(Debug, Parser)]
#[command(name = "lsifcheck", version)]
pub struct Cli {
    /// Path to the LSIF dump file (line-delimited JSON).
    pub file: PathBuf,

    /// Skip the per-line JSON Schema check; semantic checks still run.
    #[arg(long = "disable-jsonschema")]
    pub disable_jsonschema: bool,

    /// Stop at the first invalid line. The graph phase is skipped and the
    /// run is reported as partial.
    #[arg(long = "stop-on-error")]
    pub stop_on_error: bool,

    /// Line buffer capacity in bytes. A line longer than this is a reader
    /// error, never a silent truncation.
    #[arg(long = "buffer-capacity", default_value_t = DEFAULT_BUFFER_CAPACITY)]
    pub buffer_capacity: usize,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn positional_file_is_required() {
        assert!(Cli::try_parse_from(["lsifcheck"]).is_err());
    }

    #[test]
    fn defaults_match_the_documented_surface() {
        let cli = Cli::try_parse_from(["lsifcheck", "dump.lsif"]).expect("parse");
        assert_eq!(cli.file, PathBuf::from("dump.lsif"));
        assert!(!cli.disable_jsonschema);
        assert!(!cli.stop_on_error);
        assert_eq!(cli.buffer_capacity, DEFAULT_BUFFER_CAPACITY);
    }

    #[test]
    fn flags_parse() {
        let cli = Cli::try_parse_from([
            "lsifcheck",
            "dump.lsif",
            "--disable-jsonschema",
            "--stop-on-error",
            "--buffer-capacity",
            "4096",
        ])
        .expect("parse");
        assert!(cli.disable_jsonschema);
        assert!(cli.stop_on_error);
        assert_eq!(cli.buffer_capacity, 4096);
    }

    #[test]
    fn buffer_capacity_rejects_non_numeric_values() {
        assert!(
            Cli::try_parse_from(["lsifcheck", "dump.lsif", "--buffer-capacity", "lots"]).is_err()
        );
    }
}
