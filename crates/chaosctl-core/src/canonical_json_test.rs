use super::{canonical_json_bytes, canonical_json_string};
use serde_json::json;

#[test]
fn nested_object_keys_are_sorted() {
    let value = json!({
        "spec": {"templates": [{"name": "b", "inputs": {}}], "entrypoint": "main"},
        "metadata": {"name": "wf"}
    });
    let text = canonical_json_string(&value).expect("must encode");
    assert_eq!(
        text,
        r#"{"metadata":{"name":"wf"},"spec":{"entrypoint":"main","templates":[{"inputs":{},"name":"b"}]}}"#
    );
}

#[test]
fn array_order_is_preserved() {
    let value = json!({"items": [3, 1, 2]});
    let bytes = canonical_json_bytes(&value).expect("must encode");
    assert_eq!(bytes, br#"{"items":[3,1,2]}"#.to_vec());
}
