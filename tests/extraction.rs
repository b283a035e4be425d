use rstest::rstest;
use serde_json::json;
use zobject_table::{extract_error_structure, extract_zids, ErrorNode, Table, ZValue};

#[rstest]
fn key_tokens_precede_plain_ids() {
    let value = ZValue::object([("K1", ZValue::from("x")), ("Z802", ZValue::from("1"))]);
    let tokens = extract_zids(&value, true);
    assert_eq!(tokens, ["K1", "Z802"]);
}

#[rstest]
#[case(
    json!({"Z1K1": "Z2", "Z2K1": {"Z1K1": "Z6", "Z6K1": "Z401"}, "Z2K2": ["Z11", {"Z1K1": "Z11", "Z11K1": "Z1002"}]}),
    vec!["Z1", "Z2", "Z6", "Z11", "Z401", "Z1002"]
)]
#[case(json!("no ids here"), vec![])]
#[case(json!({"Z1K1": "Z7", "Z7K1": "Z802", "Z802K1": "Z41"}), vec!["Z1", "Z7", "Z802", "Z41"])]
fn base_ids_are_distinct_and_key_owners_come_first(
    #[case] wire: serde_json::Value,
    #[case] expected: Vec<&str>,
) {
    let ids = extract_zids(&ZValue::from(wire), false);
    assert_eq!(ids, expected);
}

#[rstest]
fn extraction_works_on_reconstructed_table_values() {
    let value = ZValue::object([
        ("Z1K1", ZValue::from("Z2")),
        ("Z2K2", ZValue::from("mentions Z801 in passing")),
    ]);
    let table = Table::from_value(&value).unwrap();
    let rebuilt = table.to_value().unwrap();
    let ids = extract_zids(&rebuilt, false);
    assert_eq!(ids, ["Z1", "Z2", "Z801"]);
}

#[rstest]
fn nested_error_sample() {
    let value = ZValue::from(json!({
        "Z1K1": "Z502",
        "Z502K2": {"Z1K1": "Z500", "Z500K1": "bad thing"}
    }));
    assert_eq!(
        extract_error_structure(&value),
        vec![ErrorNode {
            error_type: "Z502".to_string(),
            explanation: None,
            children: vec![ErrorNode {
                error_type: "Z500".to_string(),
                explanation: Some("bad thing".to_string()),
                children: vec![],
            }],
        }]
    );
}

#[rstest]
fn error_list_unpacks_every_item() {
    let value = ZValue::from(json!({
        "Z1K1": "Z502",
        "Z502K2": {
            "Z1K1": "Z509",
            "Z509K1": [
                "Z5",
                {"Z1K1": "Z500", "Z500K1": "first failure"},
                {"Z1K1": "Z526", "Z526K1": "Z2K2", "Z526K2": {"Z1K1": "Z500", "Z500K1": "second failure"}}
            ]
        }
    }));
    let nodes = extract_error_structure(&value);
    assert_eq!(nodes.len(), 1);
    let list = &nodes[0].children[0];
    assert_eq!(list.error_type, "Z509");
    assert_eq!(list.children.len(), 2);
    assert_eq!(list.children[0].explanation.as_deref(), Some("first failure"));
    assert_eq!(list.children[1].error_type, "Z526");
    assert_eq!(
        list.children[1].children[0].explanation.as_deref(),
        Some("second failure")
    );
}

#[rstest]
fn hybrid_shaped_errors_are_recognized_too() {
    // The same diagnostics, as they sit in the editing table.
    let value = ZValue::from(json!({
        "Z1K1": {
            "Z1K1": "Z7",
            "Z7K1": {"Z1K1": "Z9", "Z9K1": "Z885"},
            "Z885K1": {"Z1K1": "Z9", "Z9K1": "Z500"}
        },
        "Z500K1": {"Z1K1": "Z6", "Z6K1": "wrapped explanation"}
    }));
    let nodes = extract_error_structure(&value);
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].error_type, "Z500");
    assert_eq!(nodes[0].explanation.as_deref(), Some("wrapped explanation"));
}

#[rstest]
fn serialized_error_nodes_skip_empty_explanations() {
    let nodes = extract_error_structure(&ZValue::from(json!({"Z1K1": "Z511"})));
    let text = serde_json::to_string(&nodes).unwrap();
    assert_eq!(text, r#"[{"error_type":"Z511","children":[]}]"#);
}
