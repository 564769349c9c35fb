/// Positional-parameter tests: keys and text values become `?`, collected in
/// output order; type tags and NULL markers stay inline.
use dyncol_core::{create_expression, update_expression, Expression, Params, Value};

fn create_positional(json: &str) -> Expression {
    let value = Value::from_json(&serde_json::from_str(json).unwrap());
    create_expression(&value, Params::Positional).unwrap()
}

fn update_positional(column: &str, json: &str) -> Expression {
    let value = Value::from_json(&serde_json::from_str(json).unwrap());
    update_expression(column, &value, Params::Positional).unwrap()
}

#[test]
fn keys_and_text_become_placeholders() {
    let expr = create_positional(r#"{"test":"test","other":{"nothinginhere":[]}}"#);
    assert_eq!(expr.sql, "COLUMN_CREATE(?, ?, ?, COLUMN_CREATE(?, NULL))");
    assert_eq!(expr.params, vec!["test", "test", "other", "nothinginhere"]);
}

#[test]
fn numbers_and_bools_stay_inline_but_keys_do_not() {
    let expr = create_positional(r#"{"n":12,"b":false}"#);
    assert_eq!(
        expr.sql,
        "COLUMN_CREATE(?, 12 AS double, ?, 0 AS unsigned integer)"
    );
    assert_eq!(expr.params, vec!["n", "b"]);
}

#[test]
fn params_are_raw_not_escaped() {
    let expr = create_positional(r#"{"it's":"back\\slash"}"#);
    assert_eq!(expr.sql, "COLUMN_CREATE(?, ?)");
    assert_eq!(expr.params, vec!["it's", "back\\slash"]);
}

#[test]
fn params_follow_output_order_across_nesting() {
    let expr = create_positional(r#"{"a":{"x":"1"},"s":"v","b":{"y":"2"}}"#);
    assert_eq!(
        expr.sql,
        "COLUMN_CREATE(?, ?, ?, COLUMN_CREATE(?, ?), ?, COLUMN_CREATE(?, ?))"
    );
    assert_eq!(expr.params, vec!["s", "v", "b", "y", "2", "a", "x", "1"]);
}

#[test]
fn placeholder_count_matches_params() {
    let expr = create_positional(r#"{"a":[1,"two",{"three":true}],"b":null}"#);
    assert_eq!(expr.sql.matches('?').count(), expr.params.len());
}

#[test]
fn inline_mode_collects_nothing() {
    let value = Value::mapping([("k", Value::from("v"))]);
    let expr = create_expression(&value, Params::Inline).unwrap();
    assert!(expr.params.is_empty());
    assert_eq!(expr.sql, "COLUMN_CREATE('k', 'v')");
}

// ============================================================================
// Update mode
// ============================================================================

#[test]
fn update_chain_keys_are_parameterized() {
    let expr = update_positional("t", r#"{"a":{"b":"c"}}"#);
    assert_eq!(
        expr.sql,
        "COLUMN_ADD(`t`, ?, COLUMN_ADD(COLUMN_GET(`t`, ? AS BLOB), ?, ?))"
    );
    assert_eq!(expr.params, vec!["a", "a", "b", "c"]);
}

#[test]
fn update_null_sentinel_stays_inline() {
    let expr = update_positional("t", r#"{"gone":null}"#);
    assert_eq!(expr.sql, "COLUMN_ADD(`t`, ?, 'NULL')");
    assert_eq!(expr.params, vec!["gone"]);
}

#[test]
fn update_deep_chain_params_root_to_leaf() {
    let expr = update_positional("t", r#"{"x":{"y":{"z":1}}}"#);
    assert_eq!(
        expr.sql,
        "COLUMN_ADD(`t`, ?, COLUMN_ADD(COLUMN_GET(`t`, ? AS BLOB), \
         ?, COLUMN_ADD(COLUMN_GET(COLUMN_GET(`t`, ? AS BLOB), ? AS BLOB), ?, 1 AS double)))"
    );
    assert_eq!(expr.params, vec!["x", "x", "y", "x", "y", "z"]);
}
