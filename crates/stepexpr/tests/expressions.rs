//! Behavioural tests for compiling and matching step expressions.

use rstest::rstest;
use stepexpr::{
    ArgumentValue, AssertionFactories, DataTypes, ExpressionError, Locale, MatchError, Value,
    compile,
};

mod common;
use common::{matched, standard_matcher};

#[rstest]
#[case("this is a word", "this is a word", true)]
#[case("this is a word", "this  is\ta   word", true)]
#[case("this is a word", "this is a word!", false)]
#[case("this is a word", "this is word", false)]
#[case(r"this is an \^escaped \(expression", "this is an ^escaped (expression", true)]
#[case("this is a ^negated word", "this is a positive word", true)]
#[case("this is a ^negated word", "this is a negated word", false)]
#[case("a ^[negated phrase] here", "a nice phrase here", true)]
#[case("a ^[negated phrase] here", "a negated phrase here", false)]
#[case("this is an (optional) word", "this is an optional word", true)]
#[case("this is an (optional) word", "this is an word", true)]
#[case("this is an (optional) word", "this is anword", false)]
#[case("this is a word1|word2 choice", "this is a word1 choice", true)]
#[case("this is a word1|word2 choice", "this is a word2 choice", true)]
#[case("this is a word1|word2 choice", "this is a word3 choice", false)]
#[case("[one phrase|another phrase] here", "another phrase here", true)]
#[case("this is a wildcard: *", "this is a wildcard: anything at all", true)]
#[case("this is a wildcard: *", "this is a wildcard:", true)]
#[case(r"an (a\)b) word", "an word", true)]
#[case(r"an (a\)b) word", "an a)b word", true)]
#[case("(a) (b) c", "c", true)]
#[case("(a) (b) c", "b c", true)]
#[case("(a) (b) {n:integer}", "a 7", true)]
fn matches_structural_expressions(
    #[case] expression: &str,
    #[case] text: &str,
    #[case] expected: bool,
) {
    let matcher = standard_matcher(expression);
    assert_eq!(
        matched(&matcher, text, &Locale::default()).is_matched(),
        expected,
        "{expression:?} against {text:?}"
    );
}

#[test]
fn unnamed_argument_yields_a_literal_integer() {
    let matcher = standard_matcher("this is a unnamed number: {number}");
    let result = matched(&matcher, "this is a unnamed number: 42", &Locale::default());
    assert!(result.is_matched());
    assert_eq!(result.arguments().len(), 1);
    assert_eq!(
        result.argument("number"),
        Some(&ArgumentValue::Literal(Value::Integer(42)))
    );
}

#[test]
fn variable_reference_is_deferred() {
    let matcher = standard_matcher("this is a unnamed number: {number}");
    let result = matched(&matcher, "this is a unnamed number: ${varnumber}", &Locale::default());
    assert_eq!(
        result.argument("number"),
        Some(&ArgumentValue::Variable("varnumber".into()))
    );
}

#[rstest]
#[case("the number 5 is greater than 3", 5)]
#[case("the number 2 is less than 4", 2)]
fn assertion_phrases_resolve_to_predicates(#[case] text: &str, #[case] tested: i64) {
    let matcher = standard_matcher("the number {number} {{number-assertion}}");
    let result = matched(&matcher, text, &Locale::default());
    assert_eq!(
        result.argument("number"),
        Some(&ArgumentValue::Literal(Value::Integer(tested)))
    );
    let assertion = result
        .assertion()
        .unwrap_or_else(|| panic!("assertion should resolve for {text:?}"));
    assert!(assertion.test(&Value::Integer(tested)));
}

#[test]
fn longer_phrase_takes_precedence_over_its_prefix() {
    let matcher = standard_matcher("the number {number} {{number-assertion}}");
    let result = matched(
        &matcher,
        "the number 3 is greater than or equal to 3",
        &Locale::default(),
    );
    let assertion = result
        .assertion()
        .unwrap_or_else(|| panic!("assertion should resolve"));
    assert!(assertion.test(&Value::Integer(3)));
}

#[test]
fn text_assertions_work_through_expressions() {
    let matcher = standard_matcher("the title {title:text} {{text-assertion}}");
    let result = matched(
        &matcher,
        r#"the title "Release notes" starts with "Release""#,
        &Locale::default(),
    );
    let Some(ArgumentValue::Literal(title)) = result.argument("title") else {
        panic!("title should be a literal");
    };
    let assertion = result
        .assertion()
        .unwrap_or_else(|| panic!("assertion should resolve"));
    assert!(assertion.test(title));
}

#[test]
fn recompiling_yields_equivalent_matchers() {
    let expression = "a (big) [red|blue] {n:integer} *";
    let first = standard_matcher(expression);
    let second = standard_matcher(expression);
    let en = Locale::default();
    for text in [
        "a big red 1 thing",
        "a red 1",
        "a blue 1,000 x",
        "a green 1",
        "a big  blue ${n} y",
        "big red 1",
    ] {
        let left = matched(&first, text, &en);
        let right = matched(&second, text, &en);
        assert_eq!(left.is_matched(), right.is_matched(), "{text:?}");
        assert_eq!(left.arguments(), right.arguments(), "{text:?}");
    }
    assert_eq!(
        first.regex(&en).map(|regex| regex.as_str().to_string()).ok(),
        second.regex(&en).map(|regex| regex.as_str().to_string()).ok()
    );
}

#[test]
fn more_specific_expressions_rank_higher() {
    let specific = standard_matcher("the total is {n:integer} euros");
    let generic = standard_matcher("the total is *");
    assert!(specific.specificity() > generic.specificity());
}

#[rstest]
#[case("a {number", 2)]
#[case("a (b", 2)]
#[case("a b)", 3)]
#[case("a {}", 2)]
#[case("| a", 0)]
fn syntax_errors_report_offsets(#[case] expression: &str, #[case] position: usize) {
    let Err(err) = compile(
        expression,
        &DataTypes::standard(),
        &AssertionFactories::standard(),
    ) else {
        panic!("{expression:?} should be rejected");
    };
    assert!(matches!(err, ExpressionError::Pattern(_)), "{err}");
    assert_eq!(err.position(), Some(position));
}

#[test]
fn trailing_backslash_is_a_tokenize_error() {
    let Err(ExpressionError::Pattern(err)) = compile(
        "ends with \\",
        &DataTypes::standard(),
        &AssertionFactories::standard(),
    ) else {
        panic!("lone backslash should be rejected");
    };
    assert!(matches!(err, stepexpr::PatternError::Tokenize(_)));
}

#[test]
fn unknown_identifiers_name_the_culprit() {
    let Err(err) = compile(
        "pay {amount:money}",
        &DataTypes::standard(),
        &AssertionFactories::standard(),
    ) else {
        panic!("unknown type should be rejected");
    };
    assert_eq!(err.unknown_identifier(), Some("money"));
    assert!(err.to_string().contains("known types: date, datetime, decimal"));
}

#[test]
fn custom_registries_drive_compilation() {
    let mut types = DataTypes::new();
    types.register(stepexpr::RegexDataType::new(
        "colour",
        stepexpr::ValueKind::Text,
        "red|green|blue",
        ["red, green or blue"],
        |text| Ok(Value::Text(text.to_string())),
    ));
    let matcher = compile("paint it {colour}", &types, &AssertionFactories::new())
        .unwrap_or_else(|err| panic!("custom type should resolve: {err}"));
    let result = matched(&matcher, "paint it green", &Locale::default());
    assert_eq!(
        result.argument("colour"),
        Some(&ArgumentValue::Literal(Value::Text("green".into())))
    );
    assert!(!matched(&matcher, "paint it black", &Locale::default()).is_matched());
}

#[test]
fn unresolvable_assertion_values_abort_the_match() {
    let matcher = standard_matcher("{n:integer} {{integer-assertion}}");
    let Err(err) = matcher.matches("1 is greater than 9,999,999,999", &Locale::default()) else {
        panic!("overflowing reference value should fail");
    };
    assert!(matches!(err, MatchError::Assertion(_)), "{err}");
}
