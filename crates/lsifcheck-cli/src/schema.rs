/// The concrete [`SchemaChecker`] backed by the embedded LSIF JSON Schema.
///
/// The schema asset lives in `assets/lsif.schema.json` and is compiled once
/// at startup; each dump line is then parsed to a JSON value and validated
/// against it. Schema checking covers the structural rules (required
/// fields, field types, the vertex/edge discriminator); the semantic graph
/// rules live in `lsifcheck-core`.
use lsifcheck_core::{SchemaChecker, SchemaOutcome};

use crate::error::CliError;

/// The LSIF element schema, embedded at compile time.
const LSIF_SCHEMA_JSON: &str = include_str!("../assets/lsif.schema.json");

/// A [`SchemaChecker`] over the embedded LSIF JSON Schema.
pub struct JsonSchemaChecker {
    validator: jsonschema::Validator,
}

impl JsonSchemaChecker {
    /// Parses and compiles the embedded schema asset.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::SchemaAsset`] when the asset does not parse or
    /// compile — a packaging bug, reported with exit code 2.
    pub fn from_embedded() -> Result<Self, CliError> {
        let schema: serde_json::Value =
            serde_json::from_str(LSIF_SCHEMA_JSON).map_err(|error| CliError::SchemaAsset {
                detail: error.to_string(),
            })?;

        let validator =
            jsonschema::validator_for(&schema).map_err(|error| CliError::SchemaAsset {
                detail: error.to_string(),
            })?;

        Ok(Self { validator })
    }
}

impl SchemaChecker for JsonSchemaChecker {
    fn check(&self, line: &str) -> SchemaOutcome {
        let instance: serde_json::Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(error) => {
                return SchemaOutcome::invalid(Some(format!("line is not valid JSON: {error}")));
            }
        };

        match self.validator.iter_errors(&instance).next() {
            None => SchemaOutcome::valid(),
            Some(error) => SchemaOutcome::invalid(Some(error.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn checker() -> JsonSchemaChecker {
        JsonSchemaChecker::from_embedded().expect("embedded schema compiles")
    }

    #[test]
    fn embedded_schema_compiles() {
        let _checker = checker();
    }

    #[test]
    fn well_formed_vertices_pass() {
        let checker = checker();
        assert!(
            checker
                .check(r#"{"id":1,"type":"vertex","label":"metaData","projectRoot":"file:///p/"}"#)
                .valid
        );
        assert!(
            checker
                .check(r#"{"id":"d1","type":"vertex","label":"document","uri":"file:///p/a.ts"}"#)
                .valid
        );
        assert!(
            checker
                .check(
                    r#"{"id":2,"type":"vertex","label":"range","start":{"line":0,"character":0},"end":{"line":0,"character":5}}"#
                )
                .valid
        );
    }

    #[test]
    fn well_formed_edges_pass() {
        let checker = checker();
        assert!(
            checker
                .check(r#"{"id":3,"type":"edge","label":"contains","outV":1,"inVs":[2]}"#)
                .valid
        );
        assert!(
            checker
                .check(r#"{"id":4,"type":"edge","label":"next","outV":1,"inV":2}"#)
                .valid
        );
        assert!(
            checker
                .check(r#"{"id":5,"type":"edge","label":"item","outV":1,"inVs":[2],"document":6}"#)
                .valid
        );
    }

    #[test]
    fn missing_base_fields_fail() {
        let checker = checker();
        assert!(!checker.check(r#"{"id":1,"type":"vertex"}"#).valid);
        assert!(!checker.check(r#"{"type":"vertex","label":"project"}"#).valid);
    }

    #[test]
    fn unknown_element_type_fails() {
        let checker = checker();
        assert!(!checker.check(r#"{"id":1,"type":"hyperedge","label":"x"}"#).valid);
    }

    #[test]
    fn boolean_id_fails() {
        let checker = checker();
        assert!(!checker.check(r#"{"id":true,"type":"vertex","label":"project"}"#).valid);
    }

    #[test]
    fn edge_without_targets_fails() {
        let checker = checker();
        assert!(!checker.check(r#"{"id":3,"type":"edge","label":"contains","outV":1}"#).valid);
    }

    #[test]
    fn meta_data_without_project_root_fails() {
        let checker = checker();
        assert!(!checker.check(r#"{"id":1,"type":"vertex","label":"metaData"}"#).valid);
    }

    #[test]
    fn non_json_line_is_invalid_with_a_message() {
        let checker = checker();
        let outcome = checker.check("not json at all");
        assert!(!outcome.valid);
        assert!(outcome.error.expect("message").contains("not valid JSON"));
    }
}
