/// Phase 1: per-line validation.
///
/// Each dump line flows through a fixed sequence: schema check, base-element
/// parse, metadata-ordering gate, then a dispatch on element type and label
/// to the structural rule for that shape. Whatever the outcome of the label
/// rule, the element is stashed into the line index (subject to the id
/// uniqueness rules) so that phase 2 sees every line that parsed.
///
/// Edge endpoint checks resolve against the vertices stashed so far, which
/// makes forward references illegal: an edge must follow its endpoints in
/// the file. This is a stricter reading of the LSIF format than some
/// producers assume, and it is enforced deliberately.
use std::collections::HashMap;

use url::Url;

use crate::elements::{self, ElementType, Id};

use super::{ErrorKind, LineContext, LineRef, ValidationError, Validator};

// ---------------------------------------------------------------------------
// Edge typing table
// ---------------------------------------------------------------------------

/// Endpoint constraint for a 1→1 edge label: the labels its `outV` may
/// carry, and the single label its `inV` must carry.
struct Edge11Rule {
    sources: &'static [&'static str],
    target: &'static str,
}

/// The typing table for 1→1 edge labels. `contains` and `item` have their
/// own handlers; labels absent from this table are accepted structurally.
const EDGE11_RULES: &[(&str, Edge11Rule)] = &[
    (
        "next",
        Edge11Rule {
            sources: &["range", "resultSet"],
            target: "resultSet",
        },
    ),
    (
        "textDocument/definition",
        Edge11Rule {
            sources: &["range", "resultSet"],
            target: "definitionResult",
        },
    ),
    (
        "textDocument/references",
        Edge11Rule {
            sources: &["range", "resultSet"],
            target: "referenceResult",
        },
    ),
    (
        "textDocument/hover",
        Edge11Rule {
            sources: &["range", "resultSet"],
            target: "hoverResult",
        },
    ),
    (
        "moniker",
        Edge11Rule {
            sources: &["range", "resultSet"],
            target: "moniker",
        },
    ),
    (
        "nextMoniker",
        Edge11Rule {
            sources: &["moniker"],
            target: "moniker",
        },
    ),
    (
        "packageInformation",
        Edge11Rule {
            sources: &["moniker"],
            target: "packageInformation",
        },
    ),
];

fn edge11_rule(label: &str) -> Option<&'static Edge11Rule> {
    EDGE11_RULES
        .iter()
        .find(|(l, _)| *l == label)
        .map(|(_, rule)| rule)
}

// ---------------------------------------------------------------------------
// validate_line
// ---------------------------------------------------------------------------

impl Validator<'_> {
    /// Validates one dump line.
    ///
    /// Returns `false` when the line introduced at least one error; the
    /// errors themselves are appended to the sink either way, so callers
    /// that want every finding simply keep feeding lines.
    pub fn validate_line(&mut self, line: &str) -> bool {
        self.lines += 1;

        if !self.config.disable_schema {
            if let Some(checker) = self.schema {
                let outcome = checker.check(line);
                if !outcome.valid {
                    let message = match outcome.error {
                        Some(detail) => format!("failed schema validation: {detail}"),
                        None => "failed schema validation".to_owned(),
                    };
                    self.add_line_error(ErrorKind::Structural, message, line);
                    return false;
                }
            }
        }

        let element = match elements::parse_element(line) {
            Ok(element) => element,
            Err(_) => {
                self.add_line_error(ErrorKind::Structural, "failed to parse element", line);
                return false;
            }
        };

        // Ordering gate: every element before the metaData vertex is illegal.
        // The gate needs the label (the metaData line itself must pass), so
        // it sits after the base parse. Reported once per dump.
        let mut valid = true;
        if !self.has_meta_data && !element.is_meta_data() && !self.meta_data_gate_reported {
            self.meta_data_gate_reported = true;
            self.add_line_error(
                ErrorKind::Ordering,
                "metaData vertex must occur before any other element",
                line,
            );
            valid = false;
        }

        let context = LineContext {
            element,
            text: line.to_owned(),
            index: self.lines,
        };

        let dispatched = match context.element.element_type {
            ElementType::Vertex => self.validate_vertex(context),
            ElementType::Edge => self.validate_edge(context),
        };

        dispatched && valid
    }

    // -----------------------------------------------------------------------
    // Vertex rules
    // -----------------------------------------------------------------------

    fn validate_vertex(&mut self, context: LineContext) -> bool {
        let checked = match context.element.label.as_str() {
            "metaData" => self.check_meta_data_vertex(&context),
            "document" => self.check_document_vertex(&context),
            "range" => self.check_range_vertex(&context),
            _ => true,
        };

        let stashed = self.stash_vertex(context);
        checked && stashed
    }

    fn check_meta_data_vertex(&mut self, context: &LineContext) -> bool {
        if self.has_meta_data {
            self.add_error(
                ErrorKind::Ordering,
                "metaData vertex defined multiple times",
                &[context],
            );
            return false;
        }

        let meta_data = match elements::parse_meta_data(&context.text) {
            Ok(meta_data) => meta_data,
            Err(_) => {
                self.add_error(
                    ErrorKind::Structural,
                    "failed to parse metadata element",
                    &[context],
                );
                return false;
            }
        };

        let root = match Url::parse(&meta_data.project_root) {
            Ok(root) => root,
            Err(_) => {
                self.add_error(
                    ErrorKind::Structural,
                    "project root is not a valid URL",
                    &[context],
                );
                return false;
            }
        };

        self.has_meta_data = true;
        self.project_root = Some(root);
        true
    }

    fn check_document_vertex(&mut self, context: &LineContext) -> bool {
        let document = match elements::parse_document(&context.text) {
            Ok(document) => document,
            Err(_) => {
                self.add_error(
                    ErrorKind::Structural,
                    "failed to parse document element",
                    &[context],
                );
                return false;
            }
        };

        let uri = match Url::parse(&document.uri) {
            Ok(uri) => uri,
            Err(_) => {
                self.add_error(
                    ErrorKind::Structural,
                    "document uri is not a valid URL",
                    &[context],
                );
                return false;
            }
        };

        let under_root = match &self.project_root {
            Some(root) => uri.as_str().starts_with(root.as_str()),
            None => true,
        };
        if !under_root {
            self.add_error(
                ErrorKind::Structural,
                "document is not relative to project root",
                &[context],
            );
            return false;
        }

        true
    }

    fn check_range_vertex(&mut self, context: &LineContext) -> bool {
        let range = match elements::parse_document_range(&context.text) {
            Ok(range) => range,
            Err(_) => {
                self.add_error(ErrorKind::Structural, "failed to parse range", &[context]);
                return false;
            }
        };

        let bounds = [
            range.start.line,
            range.start.character,
            range.end.line,
            range.end.character,
        ];
        if bounds.iter().any(|bound| *bound < 0) {
            self.add_error(ErrorKind::Geometry, "illegal range bounds", &[context]);
            return false;
        }

        // Position derives Ord with line before character, so this is the
        // lexicographic (line, character) comparison.
        if range.start > range.end {
            self.add_error(ErrorKind::Geometry, "illegal range extents", &[context]);
            return false;
        }

        true
    }

    // -----------------------------------------------------------------------
    // Edge rules
    // -----------------------------------------------------------------------

    fn validate_edge(&mut self, context: LineContext) -> bool {
        let checked = match context.element.label.as_str() {
            "contains" => self.check_contains_edge(&context),
            "item" => self.check_item_edge(&context),
            label => match edge11_rule(label) {
                Some(rule) => self.check_edge11(&context, rule),
                None => true,
            },
        };

        let stashed = self.stash_edge(context);
        checked && stashed
    }

    fn check_contains_edge(&mut self, context: &LineContext) -> bool {
        let edge = match elements::parse_edge1n(&context.text) {
            Ok(edge) => edge,
            Err(_) => {
                self.add_error(ErrorKind::Structural, "failed to parse edge", &[context]);
                return false;
            }
        };

        if edge.in_vs.is_empty() {
            self.add_error(ErrorKind::Structural, "inVs is an empty list", &[context]);
            return false;
        }

        let Some(parent) = self.vertex_context(context, &edge.out_v) else {
            return false;
        };

        if parent.element.label == "document" {
            for in_v in &edge.in_vs {
                if !self.ensure_vertex_label(context, in_v, &["range"]) {
                    return false;
                }
            }
        }

        true
    }

    fn check_item_edge(&mut self, context: &LineContext) -> bool {
        let edge = match elements::parse_item_edge(&context.text) {
            Ok(edge) => edge,
            Err(_) => {
                self.add_error(
                    ErrorKind::Structural,
                    "failed to parse item edge",
                    &[context],
                );
                return false;
            }
        };

        if edge.in_vs.is_empty() {
            self.add_error(ErrorKind::Structural, "inVs is an empty list", &[context]);
            return false;
        }

        let Some(source) = self.vertex_context(context, &edge.out_v) else {
            return false;
        };

        // Reference results may materialize other reference results (the
        // cross-repository case); everything else materializes only ranges.
        let labels: &[&str] = if source.element.label == "referenceResult" {
            &["range", "referenceResult"]
        } else {
            &["range"]
        };

        if !self.ensure_vertex_label(context, &edge.document, &["document"]) {
            return false;
        }

        for in_v in &edge.in_vs {
            if !self.ensure_vertex_label(context, in_v, labels) {
                return false;
            }
        }

        true
    }

    fn check_edge11(&mut self, context: &LineContext, rule: &Edge11Rule) -> bool {
        let edge = match elements::parse_edge11(&context.text) {
            Ok(edge) => edge,
            Err(_) => {
                self.add_error(ErrorKind::Structural, "failed to parse edge", &[context]);
                return false;
            }
        };

        if !self.ensure_vertex_label(context, &edge.out_v, rule.sources) {
            return false;
        }

        self.ensure_vertex_label(context, &edge.in_v, &[rule.target])
    }

    // -----------------------------------------------------------------------
    // Endpoint resolution
    // -----------------------------------------------------------------------

    /// Resolves `id` against the stashed vertices, reporting a reference
    /// error against `parent` when it is absent.
    fn vertex_context(&mut self, parent: &LineContext, id: &Id) -> Option<LineContext> {
        match self.vertices.get(id) {
            Some(context) => Some(context.clone()),
            None => {
                self.add_error(
                    ErrorKind::Reference,
                    format!("no such vertex {id}"),
                    &[parent],
                );
                None
            }
        }
    }

    /// Requires `id` to resolve to a stashed vertex carrying one of
    /// `labels`. Label mismatches link the vertex's line and the edge's.
    fn ensure_vertex_label(&mut self, parent: &LineContext, id: &Id, labels: &[&str]) -> bool {
        let Some(target) = self.vertices.get(id) else {
            self.add_error(
                ErrorKind::Reference,
                format!("no such vertex {id}"),
                &[parent],
            );
            return false;
        };

        if labels.contains(&target.element.label.as_str()) {
            return true;
        }

        let target = target.clone();
        self.add_error(
            ErrorKind::Reference,
            format!("expected vertex {id} to be of type {}", labels.join(", ")),
            &[&target, parent],
        );
        false
    }

    // -----------------------------------------------------------------------
    // Line index
    // -----------------------------------------------------------------------

    fn stash_vertex(&mut self, context: LineContext) -> bool {
        Self::stash(
            &mut self.vertices,
            &self.edges,
            &mut self.errors,
            context,
            "vertex",
        )
    }

    fn stash_edge(&mut self, context: LineContext) -> bool {
        Self::stash(
            &mut self.edges,
            &self.vertices,
            &mut self.errors,
            context,
            "edge",
        )
    }

    /// Inserts `context` into `own`, refusing duplicates within `own` and
    /// id collisions with `other`. The first definition wins; the rejected
    /// line is reported with both definitions linked.
    fn stash(
        own: &mut HashMap<Id, LineContext>,
        other: &HashMap<Id, LineContext>,
        errors: &mut Vec<ValidationError>,
        context: LineContext,
        element_kind: &str,
    ) -> bool {
        if let Some(existing) = own.get(&context.element.id) {
            errors.push(ValidationError::new(
                ErrorKind::Identity,
                format!("{element_kind} {} already exists", context.element.id),
                vec![LineRef::from(&context), LineRef::from(existing)],
            ));
            return false;
        }

        if let Some(existing) = other.get(&context.element.id) {
            errors.push(ValidationError::new(
                ErrorKind::Identity,
                format!("vertices and edges cannot share id {}", context.element.id),
                vec![LineRef::from(&context), LineRef::from(existing)],
            ));
            return false;
        }

        own.insert(context.element.id.clone(), context);
        true
    }
}
