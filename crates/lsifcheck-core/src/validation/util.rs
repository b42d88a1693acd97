/// Small helpers shared by the graph-phase analyses.
///
/// These are free functions over individual validator fields rather than
/// methods so that an analysis can walk one index while appending to the
/// error sink.
use std::collections::HashMap;

use crate::elements::Id;

use super::{ErrorKind, LineContext, LineRef, ValidationError};

/// Returns the stashed line contexts of `map` sorted by line index, so
/// phase-2 error emission is deterministic and follows input order.
pub(super) fn contexts_in_line_order(map: &HashMap<Id, LineContext>) -> Vec<&LineContext> {
    let mut contexts: Vec<&LineContext> = map.values().collect();
    contexts.sort_by_key(|context| context.index);
    contexts
}

/// Builds the internal-invariant error for a stashed line that no longer
/// parses in phase 2. Every stashed line parsed once during phase 1, so a
/// failure here points at a validator bug, but it is reported and skipped
/// rather than aborting the run.
pub(super) fn internal_reparse_error(shape: &str, context: &LineContext) -> ValidationError {
    ValidationError::new(
        ErrorKind::Internal,
        format!(
            "stashed line no longer parses as {shape} (validator bug, please report)"
        ),
        vec![LineRef::from(context)],
    )
}
