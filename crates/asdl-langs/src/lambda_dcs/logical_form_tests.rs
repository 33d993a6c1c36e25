use super::*;

fn parse_error(code: &str) -> String {
    LogicalForm::parse(code).unwrap_err().to_string()
}

#[test]
fn parse_nested_form() {
    let form = LogicalForm::parse("( lambda $0 e ( and ( flight $0 ) ( from $0 dallas:ci ) ) )").unwrap();
    assert_eq!(form.name(), "lambda");
    assert_eq!(form.children().len(), 3);
    assert_eq!(form.children()[0], LogicalForm::atom("$0"));
    assert_eq!(form.children()[2].name(), "and");
    insta::assert_snapshot!(form, @"( lambda $0 e ( and ( flight $0 ) ( from $0 dallas:ci ) ) )");
}

#[test]
fn parentheses_need_no_spaces() {
    let form = LogicalForm::parse("(flight $0)").unwrap();
    assert_eq!(form, LogicalForm::list("flight", vec![LogicalForm::atom("$0")]));
    insta::assert_snapshot!(form, @"( flight $0 )");
}

#[test]
fn atoms_and_empty_lists() {
    assert_eq!(LogicalForm::parse("ci0").unwrap(), LogicalForm::atom("ci0"));
    let empty = LogicalForm::parse("( tomorrow )").unwrap();
    assert!(empty.children().is_empty());
    insta::assert_snapshot!(empty, @"( tomorrow )");
}

#[test]
fn canonical_sorts_conjunctions_only() {
    let a = LogicalForm::parse("( and ( b $0 ) ( a $0 ) )").unwrap();
    let b = LogicalForm::parse("( and ( a $0 ) ( b $0 ) )").unwrap();
    assert_ne!(a, b);
    assert_eq!(a.canonical(), b.canonical());

    let nested = LogicalForm::parse("( not ( or ( z ) ( y ) ) )").unwrap();
    insta::assert_snapshot!(nested.canonical(), @"( not ( or ( y ) ( z ) ) )");

    let apply = LogicalForm::parse("( from $0 dallas:ci )").unwrap();
    assert_eq!(apply.canonical(), apply);
    let swapped = LogicalForm::parse("( from dallas:ci $0 )").unwrap();
    assert_ne!(swapped.canonical(), apply.canonical());
}

#[test]
fn parse_errors() {
    insta::assert_snapshot!(parse_error(""), @"lambda_dcs: unexpected end of logical form");
    insta::assert_snapshot!(parse_error(")"), @"lambda_dcs: unexpected `)` at token #0");
    insta::assert_snapshot!(parse_error("( ( a ) )"), @"lambda_dcs: expected a name after `(`, found `(`");
    insta::assert_snapshot!(parse_error("( flight $0"), @"lambda_dcs: unclosed `( flight`");
    insta::assert_snapshot!(parse_error("a b"), @"lambda_dcs: unexpected `b` at token #1");
}
