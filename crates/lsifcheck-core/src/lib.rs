//! Core validation engine for LSIF (Language Server Index Format) dumps.
//!
//! An LSIF dump is a line-delimited JSON file encoding a directed graph of
//! code-intelligence facts: documents, source ranges, hover text,
//! definition/reference results, monikers, and the edges connecting them.
//! This crate certifies that a dump is structurally well-formed (via an
//! injected JSON-Schema checker) and semantically consistent (via the LSIF
//! graph invariants), collecting every finding with references back to the
//! offending input lines rather than stopping at the first.
//!
//! Validation is two-phase and strictly sequential:
//!
//! 1. feed each line through [`Validator::validate_line`];
//! 2. once the input is exhausted, call [`Validator::validate_graph`] for
//!    the whole-graph analyses (reachability, range ownership, range
//!    disjointness, item-edge consistency).
//!
//! The crate performs no I/O and produces no output; the `lsifcheck` binary
//! supplies the file reader, the concrete [`SchemaChecker`], and the report
//! rendering.

#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod elements;
pub mod schema;
pub mod validation;

pub use elements::{
    Document, DocumentRange, Edge11, Edge1n, Element, ElementType, Id, ItemEdge, MetaData,
    Position,
};
pub use schema::{SchemaChecker, SchemaOutcome};
pub use validation::{
    ErrorKind, LineContext, LineRef, Stats, ValidationConfig, ValidationError, Validator,
};
