/// Error sink, validator state, and the two-phase validation engine.
///
/// Validation runs in two phases over a dump:
///
/// 1. **Per-line** ([`Validator::validate_line`], in [`line`]) — each line is
///    schema-checked, parsed, dispatched by element type and label to a
///    structural rule, and stashed into the line index.
/// 2. **Graph** ([`Validator::validate_graph`], in [`graph`]) — after the
///    whole dump is ingested, four analyses check reachability, range
///    ownership, range disjointness, and item-edge consistency against the
///    stashed index.
///
/// Neither phase fails fast by default: every check appends structured
/// [`ValidationError`] values to the sink and reports a boolean, so a single
/// run surfaces every problem in the dump. Each error carries at least one
/// [`LineRef`] pointing back at the offending input line; identity and
/// ownership errors carry a second ref naming the corroborating line (the
/// prior definition of a duplicate id, the first owning `contains` edge).
pub mod graph;
pub mod line;
pub mod ownership;
mod util;


use std::collections::HashMap;
use std::fmt;

use url::Url;

use crate::elements::{Element, Id};
use crate::schema::SchemaChecker;
use ownership::OwnershipMap;

// ---------------------------------------------------------------------------
// ErrorKind
// ---------------------------------------------------------------------------

/// Machine-readable category of a validation error.
///
/// The CLI's human report prints only messages and line references; the kind
/// exists for library consumers and tests. [`ErrorKind::code`] returns the
/// lowercase serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// JSON parse failure, schema invalidity, missing or ill-typed field.
    Structural,
    /// Duplicate id within vertices, within edges, or across the two.
    Identity,
    /// An element before the `metaData` vertex, or metadata redefinition.
    Ordering,
    /// An edge endpoint that is missing or has the wrong label.
    Reference,
    /// A non-whitelisted vertex unreachable from the contains skeleton.
    Reachability,
    /// A range unclaimed, multiply claimed, or claimed by the wrong document.
    Ownership,
    /// Range coordinates negative or inverted, or ranges overlapping.
    Geometry,
    /// Input reader failure (line too long, underlying read error).
    Io,
    /// An impossibility that indicates a bug in the validator itself, such
    /// as a stashed line that no longer parses in phase 2.
    Internal,
}

impl ErrorKind {
    /// Returns the lowercase category string.
    pub fn code(self) -> &'static str {
        match self {
            Self::Structural => "structural",
            Self::Identity => "identity",
            Self::Ordering => "ordering",
            Self::Reference => "reference",
            Self::Reachability => "reachability",
            Self::Ownership => "ownership",
            Self::Geometry => "geometry",
            Self::Io => "io",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// LineRef / ValidationError
// ---------------------------------------------------------------------------

/// A reference to one input line, retained verbatim for error reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRef {
    /// 1-based line number within the dump.
    pub index: usize,
    /// The raw line text.
    pub text: String,
}

impl From<&LineContext> for LineRef {
    fn from(context: &LineContext) -> Self {
        Self {
            index: context.index,
            text: context.text.clone(),
        }
    }
}

/// One validation finding, anchored to the input lines that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Category of the finding.
    pub kind: ErrorKind,
    /// Human-readable description of the problem.
    pub message: String,
    /// The offending line, plus any corroborating lines. Never empty.
    pub lines: Vec<LineRef>,
}

impl ValidationError {
    /// Constructs a new [`ValidationError`].
    pub fn new(kind: ErrorKind, message: impl Into<String>, lines: Vec<LineRef>) -> Self {
        Self {
            kind,
            message: message.into(),
            lines,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        for line in &self.lines {
            write!(f, " (line #{})", line.index)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// LineContext / configuration / stats
// ---------------------------------------------------------------------------

/// A stashed dump line: the parsed base element plus its source text and
/// 1-based index, retained so phase-2 errors can cite the original input.
#[derive(Debug, Clone)]
pub struct LineContext {
    /// The base `{id, type, label}` triple parsed from the line.
    pub element: Element,
    /// The raw line text.
    pub text: String,
    /// 1-based line number within the dump.
    pub index: usize,
}

/// Configuration for a validation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValidationConfig {
    /// Skip the per-line JSON Schema check even when a checker is present.
    pub disable_schema: bool,
    /// Stop the graph phase after its first failing analysis. The per-line
    /// phase is driven by the caller, which observes
    /// [`Validator::validate_line`]'s return value to stop early.
    pub stop_on_error: bool,
}

/// Counters describing how much of a dump was ingested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Number of lines consumed.
    pub lines: usize,
    /// Number of stashed vertices.
    pub vertices: usize,
    /// Number of stashed edges.
    pub edges: usize,
}

// ---------------------------------------------------------------------------
// Validator
// ---------------------------------------------------------------------------

/// The two-phase LSIF dump validator.
///
/// Feed every dump line through [`validate_line`][Validator::validate_line],
/// then call [`validate_graph`][Validator::validate_graph] once the input is
/// exhausted. All findings accumulate in the sink exposed by
/// [`errors`][Validator::errors].
///
/// The validator is strictly sequential and single-owner: all state lives in
/// the instance and nothing is shared, so concurrent use requires external
/// synchronization.
pub struct Validator<'a> {
    schema: Option<&'a dyn SchemaChecker>,
    config: ValidationConfig,
    errors: Vec<ValidationError>,
    vertices: HashMap<Id, LineContext>,
    edges: HashMap<Id, LineContext>,
    has_meta_data: bool,
    meta_data_gate_reported: bool,
    project_root: Option<Url>,
    lines: usize,
    ownership: Option<OwnershipMap>,
}

impl<'a> Validator<'a> {
    /// Creates a validator with the given schema checker and configuration.
    ///
    /// Passing `None` for `schema` skips the per-line schema check, as does
    /// [`ValidationConfig::disable_schema`].
    pub fn new(schema: Option<&'a dyn SchemaChecker>, config: ValidationConfig) -> Self {
        Self {
            schema,
            config,
            errors: Vec::new(),
            vertices: HashMap::new(),
            edges: HashMap::new(),
            has_meta_data: false,
            meta_data_gate_reported: false,
            project_root: None,
            lines: 0,
            ownership: None,
        }
    }

    /// Returns every error collected so far, in emission order.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Returns `true` if any error has been collected.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns ingestion counters for the summary line.
    pub fn stats(&self) -> Stats {
        Stats {
            lines: self.lines,
            vertices: self.vertices.len(),
            edges: self.edges.len(),
        }
    }

    // --- sink helpers, shared by both phases ---

    /// Appends an error anchored to the current line of phase 1.
    fn add_line_error(&mut self, kind: ErrorKind, message: impl Into<String>, text: &str) {
        let index = self.lines;
        self.errors.push(ValidationError::new(
            kind,
            message,
            vec![LineRef {
                index,
                text: text.to_owned(),
            }],
        ));
    }

    /// Appends an error anchored to one or more stashed line contexts.
    fn add_error(&mut self, kind: ErrorKind, message: impl Into<String>, contexts: &[&LineContext]) {
        self.errors.push(ValidationError::new(
            kind,
            message,
            contexts.iter().copied().map(LineRef::from).collect(),
        ));
    }
}
