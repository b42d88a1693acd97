#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use proptest::prelude::*;

use super::*;

fn id_from_json(json: &str) -> Id {
    serde_json::from_str(json).expect("valid id json")
}

// ── Id canonicalization ──────────────────────────────────────────────────

#[test]
fn integer_id_canonicalizes_to_decimal_digits() {
    assert_eq!(id_from_json("7").as_str(), "7");
    assert_eq!(id_from_json("0").as_str(), "0");
    assert_eq!(id_from_json("12345").as_str(), "12345");
}

#[test]
fn string_id_keeps_surrounding_quotes() {
    assert_eq!(id_from_json("\"7\"").as_str(), "\"7\"");
    assert_eq!(id_from_json("\"abc\"").as_str(), "\"abc\"");
}

#[test]
fn string_and_integer_ids_never_conflate() {
    assert_ne!(id_from_json("1"), id_from_json("\"1\""));
}

#[test]
fn negative_integer_id_is_accepted() {
    assert_eq!(id_from_json("-3").as_str(), "-3");
}

#[test]
fn unsupported_id_types_are_rejected() {
    assert!(serde_json::from_str::<Id>("1.5").is_err());
    assert!(serde_json::from_str::<Id>("true").is_err());
    assert!(serde_json::from_str::<Id>("null").is_err());
    assert!(serde_json::from_str::<Id>("[1]").is_err());
    assert!(serde_json::from_str::<Id>("{\"id\":1}").is_err());
}

#[test]
fn id_display_matches_canonical_form() {
    assert_eq!(id_from_json("42").to_string(), "42");
    assert_eq!(id_from_json("\"42\"").to_string(), "\"42\"");
}

#[test]
fn id_constructors_match_serde() {
    assert_eq!(Id::from_integer(9), id_from_json("9"));
    assert_eq!(Id::from_string("x"), id_from_json("\"x\""));
}

// ── base element ─────────────────────────────────────────────────────────

#[test]
fn parse_element_reads_the_base_triple() {
    let element =
        parse_element(r#"{"id":1,"type":"vertex","label":"document","uri":"file:///x"}"#)
            .expect("valid element");
    assert_eq!(element.id, Id::from_integer(1));
    assert_eq!(element.element_type, ElementType::Vertex);
    assert_eq!(element.label, "document");
}

#[test]
fn parse_element_accepts_edge_type() {
    let element = parse_element(r#"{"id":"e1","type":"edge","label":"contains"}"#)
        .expect("valid element");
    assert_eq!(element.element_type, ElementType::Edge);
}

#[test]
fn parse_element_rejects_unknown_type() {
    assert!(parse_element(r#"{"id":1,"type":"hyperedge","label":"x"}"#).is_err());
}

#[test]
fn parse_element_rejects_missing_fields() {
    assert!(parse_element(r#"{"id":1,"type":"vertex"}"#).is_err());
    assert!(parse_element(r#"{"type":"vertex","label":"x"}"#).is_err());
    assert!(parse_element("not json").is_err());
}

#[test]
fn meta_data_vertex_is_recognized() {
    let element = parse_element(r#"{"id":1,"type":"vertex","label":"metaData"}"#)
        .expect("valid element");
    assert!(element.is_meta_data());

    let element = parse_element(r#"{"id":1,"type":"edge","label":"metaData"}"#)
        .expect("valid element");
    assert!(!element.is_meta_data(), "an edge is never the metaData vertex");
}

// ── specialized vertex payloads ──────────────────────────────────────────

#[test]
fn parse_meta_data_reads_project_root() {
    let meta = parse_meta_data(
        r#"{"id":1,"type":"vertex","label":"metaData","projectRoot":"file:///p/"}"#,
    )
    .expect("valid metaData");
    assert_eq!(meta.project_root, "file:///p/");
}

#[test]
fn parse_meta_data_requires_project_root() {
    assert!(parse_meta_data(r#"{"id":1,"type":"vertex","label":"metaData"}"#).is_err());
}

#[test]
fn parse_document_range_reads_positions() {
    let range = parse_document_range(
        r#"{"id":4,"type":"vertex","label":"range","start":{"line":1,"character":2},"end":{"line":3,"character":4}}"#,
    )
    .expect("valid range");
    assert_eq!(range.id, Id::from_integer(4));
    assert_eq!(range.start, Position { line: 1, character: 2 });
    assert_eq!(range.end, Position { line: 3, character: 4 });
}

#[test]
fn parse_document_range_accepts_negative_coordinates() {
    // Negative bounds are a validation error, not a parse error.
    let range = parse_document_range(
        r#"{"id":4,"type":"vertex","label":"range","start":{"line":-1,"character":0},"end":{"line":0,"character":0}}"#,
    )
    .expect("negative coordinates still parse");
    assert_eq!(range.start.line, -1);
}

#[test]
fn position_ordering_is_lexicographic() {
    let early = Position { line: 1, character: 9 };
    let late = Position { line: 2, character: 0 };
    assert!(early < late);
    assert!(Position { line: 2, character: 1 } > late);
}

// ── edge forms ───────────────────────────────────────────────────────────

#[test]
fn parse_edge_lifts_1_to_1_form() {
    let edge = parse_edge(r#"{"id":9,"type":"edge","label":"contains","outV":1,"inV":2}"#)
        .expect("valid edge");
    assert_eq!(edge.out_v, Id::from_integer(1));
    assert_eq!(edge.in_vs, vec![Id::from_integer(2)]);
}

#[test]
fn parse_edge_passes_1_to_n_form_through() {
    let edge =
        parse_edge(r#"{"id":9,"type":"edge","label":"contains","outV":1,"inVs":[2,3]}"#)
            .expect("valid edge");
    assert_eq!(edge.in_vs, vec![Id::from_integer(2), Id::from_integer(3)]);
}

#[test]
fn parse_edge_requires_some_target() {
    assert!(parse_edge(r#"{"id":9,"type":"edge","label":"contains","outV":1}"#).is_err());
}

#[test]
fn parse_edge1n_defaults_missing_targets_to_empty() {
    let edge = parse_edge1n(r#"{"id":9,"type":"edge","label":"contains","outV":1,"inV":2}"#)
        .expect("valid edge");
    assert!(edge.in_vs.is_empty(), "strict 1→N parse does not lift inV");
}

#[test]
fn parse_item_edge_reads_document_and_does_not_lift() {
    let edge = parse_item_edge(
        r#"{"id":9,"type":"edge","label":"item","outV":1,"inVs":[2],"document":3}"#,
    )
    .expect("valid item edge");
    assert_eq!(edge.document, Id::from_integer(3));
    assert_eq!(edge.in_vs, vec![Id::from_integer(2)]);

    let edge = parse_item_edge(
        r#"{"id":9,"type":"edge","label":"item","outV":1,"inV":2,"document":3}"#,
    )
    .expect("valid item edge");
    assert!(edge.in_vs.is_empty());
}

#[test]
fn parse_item_edge_requires_document() {
    assert!(
        parse_item_edge(r#"{"id":9,"type":"edge","label":"item","outV":1,"inVs":[2]}"#).is_err()
    );
}

// ── universal id properties ──────────────────────────────────────────────

proptest! {
    #[test]
    fn any_integer_id_canonicalizes_to_decimal(value in any::<u32>()) {
        let id: Id = serde_json::from_str(&value.to_string()).expect("integer id");
        prop_assert_eq!(id.as_str(), value.to_string());
    }

    #[test]
    fn any_string_id_canonicalizes_with_quotes(value in "[a-zA-Z0-9_/#-]{0,16}") {
        let id: Id = serde_json::from_str(&format!("\"{value}\"")).expect("string id");
        prop_assert_eq!(id.as_str(), format!("\"{value}\""));
    }

    #[test]
    fn string_and_integer_forms_of_same_digits_coexist(value in any::<u32>()) {
        let as_integer = Id::from_integer(i64::from(value));
        let as_string = Id::from_string(&value.to_string());
        prop_assert_ne!(as_integer, as_string);
    }

    #[test]
    fn edge_forms_are_equivalent_for_single_target(out_v in any::<u32>(), in_v in any::<u32>()) {
        let lifted = parse_edge(&format!(
            r#"{{"id":1,"type":"edge","label":"next","outV":{out_v},"inV":{in_v}}}"#
        )).expect("1→1 edge");
        let explicit = parse_edge(&format!(
            r#"{{"id":1,"type":"edge","label":"next","outV":{out_v},"inVs":[{in_v}]}}"#
        )).expect("1→N edge");
        prop_assert_eq!(lifted.out_v, explicit.out_v);
        prop_assert_eq!(lifted.in_vs, explicit.in_vs);
    }
}
