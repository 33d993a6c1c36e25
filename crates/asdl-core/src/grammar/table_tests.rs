use indoc::indoc;

use super::*;

const STMT_GRAMMAR: &str = indoc! {"
    ident

    Stmt = If(Expr cond, Stmt* body) | Pass | Return(Expr? value)
    Expr = Var(ident name)
"};

fn stmt_grammar() -> Grammar {
    Grammar::from_text(STMT_GRAMMAR).unwrap()
}

#[test]
fn root_type_is_first_defined() {
    let grammar = stmt_grammar();
    assert_eq!(grammar.root_type(), &AsdlType::Composite("Stmt".into()));
    assert!(grammar.is_composite_type(grammar.root_type()));
    assert!(!grammar.is_composite_type(&AsdlType::Primitive("ident".into())));
}

#[test]
fn productions_for_keeps_definition_order() {
    let grammar = stmt_grammar();
    let names: Vec<_> = grammar
        .productions_for(&AsdlType::Composite("Stmt".into()))
        .iter()
        .map(Production::name)
        .collect();
    assert_eq!(names, ["If", "Pass", "Return"]);

    assert!(grammar
        .productions_for(&AsdlType::Primitive("ident".into()))
        .is_empty());
    assert!(grammar
        .productions_for(&AsdlType::Composite("Unknown".into()))
        .is_empty());
}

#[test]
fn production_ids_are_sorted_and_dense() {
    let grammar = stmt_grammar();
    let rendered: Vec<_> = grammar.productions().map(ToString::to_string).collect();
    insta::assert_snapshot!(rendered.join("\n"), @r"
    Expr -> Var(ident name)
    Stmt -> If(Expr cond, Stmt* body)
    Stmt -> Pass
    Stmt -> Return(Expr? value)
    ");

    for (id, production) in grammar.productions().enumerate() {
        assert_eq!(grammar.production_id(production), Some(id));
        assert_eq!(grammar.production_by_id(id), Some(production));
    }
    assert_eq!(grammar.len(), 4);
    assert!(!grammar.is_empty());
}

#[test]
fn type_and_field_ids() {
    let grammar = stmt_grammar();

    let types: Vec<_> = grammar.types().map(AsdlType::name).collect();
    assert_eq!(types, ["Expr", "Stmt", "ident"]);
    assert_eq!(grammar.type_id(&AsdlType::Primitive("ident".into())), Some(2));
    assert_eq!(grammar.type_by_id(0), Some(&AsdlType::Composite("Expr".into())));

    let fields: Vec<_> = grammar.fields().map(ToString::to_string).collect();
    assert_eq!(fields, ["Expr cond", "Expr? value", "Stmt* body", "ident name"]);

    let body = grammar.production_by_constructor("If").unwrap().field("body").unwrap();
    assert_eq!(grammar.field_id(body), Some(2));
    assert_eq!(grammar.field_by_id(2), Some(body));
}

#[test]
fn primitive_and_composite_types() {
    let grammar = stmt_grammar();
    let primitives: Vec<_> = grammar.primitive_types().map(AsdlType::name).collect();
    assert_eq!(primitives, ["ident"]);
    let composites: Vec<_> = grammar.composite_types().map(AsdlType::name).collect();
    assert_eq!(composites, ["Stmt", "Expr"]);
}

#[test]
fn productions_equal_across_parses() {
    let a = stmt_grammar();
    let b = stmt_grammar();
    let if_a = a.production_by_constructor("If").unwrap();
    let if_b = b.production_by_constructor("If").unwrap();
    assert_eq!(if_a, if_b);
    assert_eq!(a.production_id(if_b), Some(1));
}

#[test]
fn display_renders_asdl_text() {
    insta::assert_snapshot!(stmt_grammar().to_string(), @r"
    ident

    Stmt = If(Expr cond, Stmt* body)
         | Pass
         | Return(Expr? value)
    Expr = Var(ident name)
    ");
}

#[test]
fn display_reparses_to_same_grammar() {
    let grammar = stmt_grammar();
    let reparsed = Grammar::from_text(&grammar.to_string()).unwrap();
    assert_eq!(reparsed.to_string(), grammar.to_string());
    assert_eq!(reparsed.root_type(), grammar.root_type());
}

#[test]
fn new_rejects_empty() {
    assert!(matches!(Grammar::new(Vec::new()), Err(GrammarError::Empty)));
}

#[test]
fn new_from_hand_built_productions() {
    let expr = AsdlType::Composite("expr".into());
    let num = Production::new(
        expr.clone(),
        Constructor::new(
            "Num",
            vec![Field::new("n", AsdlType::Primitive("int".into()), Cardinality::Single)],
        ),
    );
    let neg = Production::new(
        expr.clone(),
        Constructor::new("Neg", vec![Field::new("operand", expr.clone(), Cardinality::Single)]),
    );
    let grammar = Grammar::new(vec![num.clone(), neg]).unwrap();
    assert_eq!(grammar.root_type(), &expr);
    assert_eq!(grammar.productions_for(&expr)[0], num);
    assert_eq!(num.field_index("n"), Some(0));
    assert_eq!(num.field_index("missing"), None);
}
