/// LSIF element model and per-line parsers.
///
/// An LSIF dump is one JSON object per line. Every object carries the base
/// triple `{id, type, label}`; the `label` then selects a specialized shape
/// (metadata, document, range, or one of the edge forms). This module defines
/// those shapes and the `&str -> Result<T, serde_json::Error>` parsers that
/// decode a single line into them.
///
/// Edges appear on the wire in two forms: 1→1 (`outV`/`inV`) and 1→N
/// (`outV`/`inVs`). [`parse_edge`] normalizes both into the 1→N
/// [`Edge1n`] form, which is the canonical edge representation used by all
/// downstream analysis.
pub mod id;

#[cfg(test)]
mod tests;

use serde::Deserialize;

pub use id::Id;

/// Whether an element is a vertex or an edge.
///
/// These are the only two element kinds in LSIF; any other `type` string
/// fails the base-element parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    /// A payload-carrying graph node (document, range, result, ...).
    Vertex,
    /// A typed relationship between vertices.
    Edge,
}

/// The base triple present on every LSIF element.
#[derive(Debug, Clone, Deserialize)]
pub struct Element {
    /// Element identifier, canonicalized (see [`Id`]).
    pub id: Id,
    /// Element kind.
    #[serde(rename = "type")]
    pub element_type: ElementType,
    /// Element label (`"metaData"`, `"document"`, `"contains"`, ...).
    ///
    /// Kept as a string: the vertex label set is open-ended and unknown
    /// labels are structurally legal.
    pub label: String,
}

impl Element {
    /// Returns `true` for the `metaData` vertex, which must open the dump.
    pub fn is_meta_data(&self) -> bool {
        self.element_type == ElementType::Vertex && self.label == "metaData"
    }
}

/// The `metaData` vertex payload.
#[derive(Debug, Clone, Deserialize)]
pub struct MetaData {
    /// URI of the project root; every document URI must live under it.
    #[serde(rename = "projectRoot")]
    pub project_root: String,
}

/// The `document` vertex payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    /// URI of the source file this vertex stands for.
    pub uri: String,
}

/// A zero-based (line, character) position within a document.
///
/// Coordinates are decoded as signed integers so that a negative coordinate
/// surfaces as a range-bounds validation error rather than a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
pub struct Position {
    /// Zero-based line number.
    pub line: i64,
    /// Zero-based character offset within the line.
    pub character: i64,
}

/// The `range` vertex payload: a half-open interval within a document.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentRange {
    /// Range identifier (repeated here so phase-2 re-parses keep the id).
    pub id: Id,
    /// Interval start.
    pub start: Position,
    /// Interval end.
    pub end: Position,
}

/// An edge in 1→1 wire form.
#[derive(Debug, Clone, Deserialize)]
pub struct Edge11 {
    /// Source vertex id.
    #[serde(rename = "outV")]
    pub out_v: Id,
    /// Target vertex id.
    #[serde(rename = "inV")]
    pub in_v: Id,
}

/// An edge in 1→N wire form — the canonical in-memory edge shape.
#[derive(Debug, Clone, Deserialize)]
pub struct Edge1n {
    /// Source vertex id.
    #[serde(rename = "outV")]
    pub out_v: Id,
    /// Target vertex ids; empty when the wire form carried neither
    /// `inVs` nor a liftable `inV`.
    #[serde(rename = "inVs", default)]
    pub in_vs: Vec<Id>,
}

/// An `item` edge: a 1→N edge that additionally names the document whose
/// coordinate space its targets live in.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemEdge {
    /// Source vertex id (a definition or reference result).
    #[serde(rename = "outV")]
    pub out_v: Id,
    /// Target vertex ids.
    #[serde(rename = "inVs", default)]
    pub in_vs: Vec<Id>,
    /// Id of the `document` vertex that owns the targets.
    pub document: Id,
}

/// Parses the base `{id, type, label}` triple from one dump line.
pub fn parse_element(line: &str) -> Result<Element, serde_json::Error> {
    serde_json::from_str(line)
}

/// Parses a `metaData` vertex line.
pub fn parse_meta_data(line: &str) -> Result<MetaData, serde_json::Error> {
    serde_json::from_str(line)
}

/// Parses a `document` vertex line.
pub fn parse_document(line: &str) -> Result<Document, serde_json::Error> {
    serde_json::from_str(line)
}

/// Parses a `range` vertex line.
pub fn parse_document_range(line: &str) -> Result<DocumentRange, serde_json::Error> {
    serde_json::from_str(line)
}

/// Parses an edge line in strict 1→1 form.
pub fn parse_edge11(line: &str) -> Result<Edge11, serde_json::Error> {
    serde_json::from_str(line)
}

/// Parses an edge line in strict 1→N form; a missing `inVs` yields an
/// empty list, which the `contains`/`item` handlers reject.
pub fn parse_edge1n(line: &str) -> Result<Edge1n, serde_json::Error> {
    serde_json::from_str(line)
}

/// Parses an `item` edge line.
///
/// Note that `item` edges are not lifted: an `item` edge written with a
/// bare `inV` parses to an empty `in_vs` and fails the non-empty check.
pub fn parse_item_edge(line: &str) -> Result<ItemEdge, serde_json::Error> {
    serde_json::from_str(line)
}

/// Parses an edge line in either wire form, normalizing to [`Edge1n`].
///
/// A 1→1 edge is lifted into a singleton `in_vs` list, so downstream code
/// sees exactly one edge shape regardless of how the producer wrote it.
pub fn parse_edge(line: &str) -> Result<Edge1n, serde_json::Error> {
    let mut edge = parse_edge1n(line)?;
    if edge.in_vs.is_empty() {
        let edge11 = parse_edge11(line)?;
        edge.in_vs.push(edge11.in_v);
    }

    Ok(edge)
}
