/// Rendering of the validation report and the success summary.
///
/// The report lists every error, numbered from 1, each followed by one
/// indented `on line #N: <text>` reference per associated input line:
///
/// ```text
/// 1) ranges overlap
///     on line #3: {"id":3,"type":"vertex","label":"range",...}
///     on line #4: {"id":4,"type":"vertex","label":"range",...}
/// ```
use std::io::{self, Write};

use lsifcheck_core::{Stats, ValidationError};

/// Writes the numbered error report.
pub fn write_report<W: Write>(writer: &mut W, errors: &[ValidationError]) -> io::Result<()> {
    for (position, error) in errors.iter().enumerate() {
        writeln!(writer, "{}) {}", position + 1, error.message)?;
        for line in &error.lines {
            writeln!(writer, "    on line #{}: {}", line.index, line.text)?;
        }
    }

    Ok(())
}

/// Writes the clean-run summary with ingestion counts.
pub fn write_summary<W: Write>(writer: &mut W, stats: Stats) -> io::Result<()> {
    writeln!(
        writer,
        "dump is valid ({} vertices, {} edges)",
        stats.vertices, stats.edges
    )
}

/// Writes the warning emitted when phase 1 stopped before the end of the
/// dump, so the graph-level invariants were never checked.
pub fn write_partial_warning<W: Write>(writer: &mut W) -> io::Result<()> {
    writeln!(
        writer,
        "warning: validation is partial; remaining lines and graph invariants were not checked"
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use lsifcheck_core::{ErrorKind, LineRef};

    use super::*;

    fn render(errors: &[ValidationError]) -> String {
        let mut buffer = Vec::new();
        write_report(&mut buffer, errors).expect("write report");
        String::from_utf8(buffer).expect("utf-8 report")
    }

    #[test]
    fn report_numbers_errors_from_one() {
        let errors = vec![
            ValidationError::new(
                ErrorKind::Geometry,
                "ranges overlap",
                vec![
                    LineRef {
                        index: 3,
                        text: "{\"id\":3}".to_owned(),
                    },
                    LineRef {
                        index: 4,
                        text: "{\"id\":4}".to_owned(),
                    },
                ],
            ),
            ValidationError::new(
                ErrorKind::Reachability,
                "vertex 5 unreachable from any range",
                vec![LineRef {
                    index: 5,
                    text: "{\"id\":5}".to_owned(),
                }],
            ),
        ];

        let report = render(&errors);
        let expected = "1) ranges overlap\n    on line #3: {\"id\":3}\n    on line #4: {\"id\":4}\n2) vertex 5 unreachable from any range\n    on line #5: {\"id\":5}\n";
        assert_eq!(report, expected);
    }

    #[test]
    fn empty_error_list_renders_nothing() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn summary_reports_counts() {
        let mut buffer = Vec::new();
        write_summary(
            &mut buffer,
            Stats {
                lines: 2,
                vertices: 2,
                edges: 0,
            },
        )
        .expect("write summary");
        assert_eq!(
            String::from_utf8(buffer).expect("utf-8"),
            "dump is valid (2 vertices, 0 edges)\n"
        );
    }
}
