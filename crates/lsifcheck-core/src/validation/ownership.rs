/// The shared range-ownership map: `range id → owning document`.
///
/// Three of the four graph analyses need to know which document claims each
/// range via a `contains` edge. The map is computed once, on first access,
/// and cached on the validator; repeated access returns the cached value and
/// emits no further errors, so the analyses can each ask for it without
/// coordinating.
///
/// Multiple claims are an ownership error (both `contains` edges linked);
/// the first claim in line order wins and is retained in the map.
use std::collections::HashMap;

use crate::elements::{self, Id};

use super::util;
use super::{ErrorKind, LineContext, LineRef, ValidationError, Validator};

/// The owning document of a range, with the `contains` edge that claimed it.
#[derive(Debug, Clone)]
pub struct Owner {
    /// Id of the owning `document` vertex.
    pub document: Id,
    /// Line context of the claiming `contains` edge.
    pub context: LineContext,
}

/// Range id → owner, as established by document-owned `contains` edges.
pub type OwnershipMap = HashMap<Id, Owner>;

impl Validator<'_> {
    /// Returns the ownership map, computing and caching it on first call.
    pub(super) fn ownership_map(&mut self) -> &OwnershipMap {
        if self.ownership.is_none() {
            let map = self.compute_ownership_map();
            self.ownership = Some(map);
        }

        match self.ownership.as_ref() {
            Some(map) => map,
            None => unreachable!("ownership map computed above"),
        }
    }

    /// Walks every `contains` edge whose source is a stashed `document`
    /// vertex, in line order, mapping each target to its owner.
    fn compute_ownership_map(&mut self) -> OwnershipMap {
        let mut map = OwnershipMap::new();
        let mut errors: Vec<ValidationError> = Vec::new();

        for context in util::contexts_in_line_order(&self.edges) {
            if context.element.label != "contains" {
                continue;
            }

            // Both wire forms count; parse_edge lifts 1→1 into 1→N.
            let Ok(edge) = elements::parse_edge(&context.text) else {
                errors.push(util::internal_reparse_error("an edge", context));
                continue;
            };

            let is_document = self
                .vertices
                .get(&edge.out_v)
                .is_some_and(|parent| parent.element.label == "document");
            if !is_document {
                continue;
            }

            for in_v in edge.in_vs {
                if let Some(previous) = map.get(&in_v) {
                    errors.push(ValidationError::new(
                        ErrorKind::Ownership,
                        format!(
                            "range {in_v} already claimed by document {}",
                            previous.document
                        ),
                        vec![LineRef::from(context), LineRef::from(&previous.context)],
                    ));
                    continue;
                }

                map.insert(
                    in_v,
                    Owner {
                        document: edge.out_v.clone(),
                        context: context.clone(),
                    },
                );
            }
        }

        self.errors.extend(errors);
        map
    }
}

/// Inverts the ownership map into `document id → owned range ids`.
pub(super) fn invert_ownership_map(map: &OwnershipMap) -> HashMap<Id, Vec<Id>> {
    let mut inverted: HashMap<Id, Vec<Id>> = HashMap::new();
    for (range_id, owner) in map {
        inverted
            .entry(owner.document.clone())
            .or_default()
            .push(range_id.clone());
    }

    inverted
}
