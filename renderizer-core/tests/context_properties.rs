//! End-to-end context resolution properties.
//!
//! Each `#[case]` is isolated — no shared state.

use renderizer_core::{type_mapping, type_value, GlobalContext, Scalar, Value};
use rstest::rstest;

// ---------------------------------------------------------------------------
// Typing
// ---------------------------------------------------------------------------

#[rstest]
#[case("false")]
#[case("123")]
#[case("-0.125")]
#[case("10.0")]
#[case("plain words")]
fn typing_survives_restringify(#[case] text: &str) {
    let typed = type_value(text);
    assert_eq!(type_value(&typed.to_string()), typed);
}

#[test]
fn retyping_a_built_context_changes_nothing() {
    let ctx = GlobalContext::from_assignments(
        ["--a=1", "--a=x", "--b.c=2.5", "--d", "--e=TRUE"],
        false,
    );
    let mut retyped = ctx.clone().into_mapping();
    type_mapping(&mut retyped);
    assert_eq!(&retyped, ctx.as_mapping());
}

// ---------------------------------------------------------------------------
// Assignments
// ---------------------------------------------------------------------------

#[rstest]
#[case(&["--a.b=1", "--a.b=2"], vec![1, 2])]
#[case(&["--a.b=3", "--a.b=2", "--a.b=1"], vec![3, 2, 1])]
fn repeated_paths_accumulate_in_order(#[case] tokens: &[&str], #[case] expected: Vec<i64>) {
    let ctx = GlobalContext::from_assignments(tokens.iter().copied(), false);
    let expected = Value::Seq(
        expected
            .into_iter()
            .map(|i| Value::Scalar(Scalar::Int(i)))
            .collect(),
    );
    assert_eq!(ctx.get("a.b"), Some(&expected));
}

#[rstest]
#[case(true, &["--name=value"], "Name")]
#[case(true, &["-C", "--name=value"], "name")]
#[case(false, &["--name=value"], "name")]
#[case(false, &["-c", "--name=value"], "Name")]
fn capitalization_controls_key_case(
    #[case] capitalize: bool,
    #[case] tokens: &[&str],
    #[case] key: &str,
) {
    let ctx = GlobalContext::from_assignments(tokens.iter().copied(), capitalize);
    assert_eq!(ctx.get(key), Some(&Value::string("value")));
    assert_eq!(ctx.as_mapping().len(), 1);
}

#[test]
fn mixed_types_in_repeated_path_are_kept_individually() {
    let ctx = GlobalContext::from_assignments(["--v=1", "--v=two", "--v=3.5", "--v"], false);
    assert_eq!(
        ctx.get("v"),
        Some(&Value::Seq(vec![
            Value::Scalar(Scalar::Int(1)),
            Value::string("two"),
            Value::Scalar(Scalar::Float(3.5)),
            Value::Scalar(Scalar::Bool(true)),
        ]))
    );
}
