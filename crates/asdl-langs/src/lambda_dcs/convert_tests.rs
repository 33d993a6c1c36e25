use asdl_transition::{Action, Hypothesis, TransitionError, TransitionSystem, check_actions, verify_ast};
use indoc::indoc;

use super::*;

const FLIGHTS_FROM_DALLAS: &str = "( lambda $0 e ( and ( flight $0 ) ( from $0 dallas:ci ) ) )";

fn lambda() -> LambdaCalculusTransitionSystem {
    LambdaCalculusTransitionSystem::new(grammar().clone())
}

fn render(actions: &[Action]) -> String {
    actions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn built_in_grammar() {
    let grammar = grammar();
    assert_eq!(grammar.root_type().name(), "expr");
    assert_eq!(grammar.len(), 20);
    let primitives: Vec<_> = grammar.primitive_types().map(|t| t.name()).collect();
    assert_eq!(primitives, ["ent", "num", "pred", "var", "var_type"]);
}

#[test]
fn logical_form_to_tree() {
    let system = lambda();
    let ast = system.surface_code_to_ast(FLIGHTS_FROM_DALLAS).unwrap();
    insta::assert_snapshot!(ast, @"(Lambda (var-variable $0) (var_type-type e) (expr-body (And (expr*-arguments (Apply (pred-predicate flight) (expr*-arguments (Variable (var-variable $0)))) (Apply (pred-predicate from) (expr*-arguments (Variable (var-variable $0)) (Entity (ent-entity dallas:ci))))))))");
    assert_eq!(system.ast_to_surface_code(&ast).unwrap(), FLIGHTS_FROM_DALLAS);
}

#[test]
fn tree_to_actions() {
    let system = lambda();
    let ast = system.surface_code_to_ast(FLIGHTS_FROM_DALLAS).unwrap();
    insta::assert_snapshot!(render(&system.get_actions(&ast).unwrap()), @r"
    ApplyRule[expr -> Lambda(var variable, var_type type, expr body)]
    GenToken[$0]
    GenToken[e]
    ApplyRule[expr -> And(expr* arguments)]
    ApplyRule[expr -> Apply(pred predicate, expr* arguments)]
    GenToken[flight]
    ApplyRule[expr -> Variable(var variable)]
    GenToken[$0]
    Reduce
    ApplyRule[expr -> Apply(pred predicate, expr* arguments)]
    GenToken[from]
    ApplyRule[expr -> Variable(var variable)]
    GenToken[$0]
    ApplyRule[expr -> Entity(ent entity)]
    GenToken[dallas:ci]
    Reduce
    Reduce
    ");
}

#[test]
fn logical_forms_round_trip_through_actions() {
    let system = lambda();
    for code in [
        FLIGHTS_FROM_DALLAS,
        "( argmin $0 ( and ( flight $0 ) ( to $0 boston:ci ) ) ( fare $0 ) )",
        "( lambda $0 e ( > ( departure_time $0 ) 1600:ti ) )",
        "( count $0 ( and ( flight $0 ) ( = ( stops $0 ) 0 ) ) )",
        "( lambda $0 e ( not ( nonstop $0 ) ) )",
        "( lambda $0 e ( or ( < ( fare $0 ) 200 ) ( exists $1 ( from $1 $0 ) ) ) )",
        "( sum $0 ( the $1 ( capital $1 ) ) ( population $0 ) )",
        "( max $0 ( min $1 ( tomorrow ) ) )",
        "dallas:ci",
    ] {
        let ast = system.surface_code_to_ast(code).unwrap();
        let actions = verify_ast(&system, &ast).unwrap();
        let hyp = check_actions(&system, &actions).unwrap();
        let decoded = system.ast_to_surface_code(hyp.tree().unwrap()).unwrap();
        assert_eq!(decoded, code);
        assert!(system.hyp_correct(&hyp, &ast), "{code}");
    }
}

#[test]
fn atom_kinds() {
    let system = lambda();
    let kind = |code: &str| {
        let ast = system.surface_code_to_ast(code).unwrap();
        ast.root_node().production().name().to_owned()
    };
    assert_eq!(kind("$3"), "Variable");
    assert_eq!(kind("42"), "Number");
    assert_eq!(kind("1.5"), "Number");
    assert_eq!(kind("ci0"), "Entity");
    assert_eq!(kind("inf"), "Entity");
    assert_eq!(kind("( ground_transport )"), "Apply");
    assert_eq!(kind("( = $0 $1 )"), "Compare");
}

#[test]
fn comparison_ignores_conjunction_order() {
    let system = lambda();
    let a = system
        .surface_code_to_ast("( lambda $0 e ( and ( flight $0 ) ( from $0 dallas:ci ) ) )")
        .unwrap();
    let b = system
        .surface_code_to_ast("( lambda $0 e ( and ( from $0 dallas:ci ) ( flight $0 ) ) )")
        .unwrap();
    let c = system
        .surface_code_to_ast("( lambda $0 e ( and ( from $0 boston:ci ) ( flight $0 ) ) )")
        .unwrap();

    assert_ne!(a, b);
    assert!(system.compare_ast(&a, &b));
    assert!(!system.compare_ast(&a, &c));

    let actions = system.get_actions(&b).unwrap();
    let mut hyp = Hypothesis::new();
    for action in actions {
        hyp.apply_action(action).unwrap();
    }
    assert!(system.hyp_correct(&hyp, &a));
}

#[test]
fn multi_line_logical_form() {
    let system = lambda();
    let code = indoc! {"
        ( argmax $0
          ( and ( flight $0 )
                ( from $0 dallas:ci ) )
          ( departure_time $0 ) )
    "};
    let ast = system.surface_code_to_ast(code).unwrap();
    insta::assert_snapshot!(
        system.ast_to_surface_code(&ast).unwrap(),
        @"( argmax $0 ( and ( flight $0 ) ( from $0 dallas:ci ) ) ( departure_time $0 ) )"
    );
}

#[test]
fn tokenize_splits_on_whitespace() {
    let system = lambda();
    assert_eq!(
        system.tokenize_code("( flight  $0 )"),
        ["(", "flight", "$0", ")"]
    );
}

#[test]
fn conversion_errors() {
    let system = lambda();
    let err = |code: &str| system.surface_code_to_ast(code).unwrap_err().to_string();

    insta::assert_snapshot!(err("( lambda $0 e )"), @"lambda_dcs: `lambda` takes 3 arguments, found 2");
    insta::assert_snapshot!(err("( not )"), @"lambda_dcs: `not` takes 1 arguments, found 0");
    insta::assert_snapshot!(
        err("( count ( x ) ( y ) )"),
        @"lambda_dcs: expected a name for `variable`, found `( x )`"
    );
    assert!(matches!(
        system.surface_code_to_ast("( flight"),
        Err(TransitionError::SurfaceCode { .. })
    ));
}

#[test]
fn shared_system() {
    let shared = system();
    assert_eq!(shared.name(), "lambda_dcs");
    assert!(std::sync::Arc::ptr_eq(&shared, &system()));
}
