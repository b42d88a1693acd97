/// Phase 2: whole-graph analyses, run once after the dump is ingested.
///
/// Four analyses run in fixed order: reachability, range ownership, range
/// disjointness, and item-edge ownership. The latter three consult the
/// memoized ownership map (see [`super::ownership`]). Unless
/// `stop_on_error` is set, every analysis runs even when an earlier one
/// failed, so a single pass reports every graph-level problem.
///
/// All iteration here is in line order (or document-id order for the
/// disjointness pass), which keeps the emitted error list — not merely its
/// set — identical across runs.
use std::collections::HashSet;

use crate::elements::{self, Edge1n, Id};

use super::ownership::invert_ownership_map;
use super::util;
use super::{ErrorKind, LineRef, ValidationError, Validator};

/// Vertex labels exempt from the reachability requirement: metadata and
/// project vertices are structurally disconnected from the range skeleton.
const REACHABILITY_WHITELIST: &[&str] = &["metaData", "project"];

impl Validator<'_> {
    /// Runs the graph-phase analyses.
    ///
    /// Returns `false` when any analysis reported an error. When
    /// `stop_on_error` is configured the run stops after the first failing
    /// analysis; otherwise all four run to completion.
    pub fn validate_graph(&mut self) -> bool {
        let analyses: [fn(&mut Self) -> bool; 4] = [
            Self::ensure_reachability,
            Self::ensure_range_ownership,
            Self::ensure_disjoint_ranges,
            Self::ensure_item_ownership,
        ];

        let mut valid = true;
        for analysis in analyses {
            let errors_before = self.errors.len();
            let ok = analysis(self);
            // Computing the shared ownership map can itself surface errors
            // (multiple claims); charge those to the analysis that forced
            // the computation.
            if !ok || self.errors.len() > errors_before {
                valid = false;
                if self.config.stop_on_error {
                    return false;
                }
            }
        }

        valid
    }

    // -----------------------------------------------------------------------
    // Reachability
    // -----------------------------------------------------------------------

    /// Every vertex outside the whitelist must be reachable by forward-edge
    /// traversal from the endpoints of the `contains` edges.
    ///
    /// The start set is the union of `outV` and `inVs` over every
    /// `contains` edge, document-owned or not; the closure then repeatedly
    /// scans all edges, marking targets of visited sources, until a scan
    /// changes nothing. Running the closure again would leave the visited
    /// set unchanged — it is a fixed point.
    fn ensure_reachability(&mut self) -> bool {
        // Parse every stashed edge once, in line order. The closure below
        // rescans this list instead of re-parsing per iteration.
        let mut edges: Vec<(bool, Edge1n)> = Vec::new();
        let mut errors: Vec<ValidationError> = Vec::new();
        for context in util::contexts_in_line_order(&self.edges) {
            match elements::parse_edge(&context.text) {
                Ok(edge) => edges.push((context.element.label == "contains", edge)),
                Err(_) => errors.push(util::internal_reparse_error("an edge", context)),
            }
        }

        let mut visited: HashSet<Id> = HashSet::new();
        for (is_contains, edge) in &edges {
            if *is_contains {
                visited.insert(edge.out_v.clone());
                for in_v in &edge.in_vs {
                    visited.insert(in_v.clone());
                }
            }
        }

        let mut changed = true;
        while changed {
            changed = false;
            for (_, edge) in &edges {
                if !visited.contains(&edge.out_v) {
                    continue;
                }
                for in_v in &edge.in_vs {
                    if visited.insert(in_v.clone()) {
                        changed = true;
                    }
                }
            }
        }

        for context in util::contexts_in_line_order(&self.vertices) {
            if REACHABILITY_WHITELIST.contains(&context.element.label.as_str()) {
                continue;
            }
            if !visited.contains(&context.element.id) {
                errors.push(ValidationError::new(
                    ErrorKind::Reachability,
                    format!("vertex {} unreachable from any range", context.element.id),
                    vec![LineRef::from(context)],
                ));
            }
        }

        let valid = errors.is_empty();
        self.errors.extend(errors);
        valid
    }

    // -----------------------------------------------------------------------
    // Range ownership
    // -----------------------------------------------------------------------

    /// Every `range` vertex must be claimed by exactly one document-owned
    /// `contains` edge. Multiple claims are reported by the ownership-map
    /// computation; unclaimed ranges are reported here.
    fn ensure_range_ownership(&mut self) -> bool {
        self.ownership_map();
        let owned = match self.ownership.as_ref() {
            Some(map) => map,
            None => unreachable!("ownership map computed above"),
        };

        let mut errors: Vec<ValidationError> = Vec::new();
        for context in util::contexts_in_line_order(&self.vertices) {
            if context.element.label != "range" {
                continue;
            }
            if !owned.contains_key(&context.element.id) {
                errors.push(ValidationError::new(
                    ErrorKind::Ownership,
                    format!("range {} not owned by any document", context.element.id),
                    vec![LineRef::from(context)],
                ));
            }
        }

        let valid = errors.is_empty();
        self.errors.extend(errors);
        valid
    }

    // -----------------------------------------------------------------------
    // Disjoint ranges
    // -----------------------------------------------------------------------

    /// Within one document, no two owned ranges may overlap.
    ///
    /// Ranges are sorted by `(start.line, start.character)`; consecutive
    /// ranges overlap when the earlier end exceeds the later start,
    /// compared lexicographically. Two ranges that merely touch
    /// (`prev.end == next.start`) are treated as disjoint; whether the
    /// format allows touching ranges is unsettled, and the strict
    /// inequality preserves the permissive reading.
    fn ensure_disjoint_ranges(&mut self) -> bool {
        self.ownership_map();
        let owned = match self.ownership.as_ref() {
            Some(map) => map,
            None => unreachable!("ownership map computed above"),
        };
        let inverted = invert_ownership_map(owned);

        let mut documents: Vec<(&Id, &Vec<Id>)> = inverted.iter().collect();
        documents.sort_by(|a, b| a.0.cmp(b.0));

        let mut errors: Vec<ValidationError> = Vec::new();
        for (_, range_ids) in documents {
            let mut ranges = Vec::new();
            for range_id in range_ids {
                // Targets that are missing or mistyped were already
                // reported in phase 1; the geometry pass skips them.
                let Some(context) = self.vertices.get(range_id) else {
                    continue;
                };
                if context.element.label != "range" {
                    continue;
                }
                match elements::parse_document_range(&context.text) {
                    Ok(range) => ranges.push((range, context)),
                    Err(_) => errors.push(util::internal_reparse_error("a range", context)),
                }
            }

            // Line index as tiebreak keeps the report stable when two
            // ranges share a start position.
            ranges.sort_by_key(|(range, context)| (range.start, context.index));

            for pair in ranges.windows(2) {
                let (previous, previous_context) = &pair[0];
                let (next, next_context) = &pair[1];
                if previous.end > next.start {
                    errors.push(ValidationError::new(
                        ErrorKind::Geometry,
                        "ranges overlap",
                        vec![LineRef::from(*previous_context), LineRef::from(*next_context)],
                    ));
                }
            }
        }

        let valid = errors.is_empty();
        self.errors.extend(errors);
        valid
    }

    // -----------------------------------------------------------------------
    // Item-edge ownership
    // -----------------------------------------------------------------------

    /// Every target of an `item` edge must be owned by the document the
    /// edge declares, per the ownership map. The error links the item edge
    /// and, when a different document claimed the target, the claiming
    /// `contains` edge.
    fn ensure_item_ownership(&mut self) -> bool {
        self.ownership_map();
        let owned = match self.ownership.as_ref() {
            Some(map) => map,
            None => unreachable!("ownership map computed above"),
        };

        let mut errors: Vec<ValidationError> = Vec::new();
        for context in util::contexts_in_line_order(&self.edges) {
            if context.element.label != "item" {
                continue;
            }

            let Ok(edge) = elements::parse_item_edge(&context.text) else {
                errors.push(util::internal_reparse_error("an item edge", context));
                continue;
            };

            // The lifted form covers item edges written 1→1.
            let Ok(lifted) = elements::parse_edge(&context.text) else {
                errors.push(util::internal_reparse_error("an edge", context));
                continue;
            };

            for in_v in &lifted.in_vs {
                let message = format!(
                    "vertex {in_v} not owned by document {}, as implied by item edge {}",
                    edge.document, context.element.id
                );
                match owned.get(in_v) {
                    Some(owner) if owner.document == edge.document => {}
                    Some(owner) => errors.push(ValidationError::new(
                        ErrorKind::Ownership,
                        message,
                        vec![LineRef::from(context), LineRef::from(&owner.context)],
                    )),
                    None => errors.push(ValidationError::new(
                        ErrorKind::Ownership,
                        message,
                        vec![LineRef::from(context)],
                    )),
                }
            }
        }

        let valid = errors.is_empty();
        self.errors.extend(errors);
        valid
    }
}
