use crate::test_utils::{IF_PASS_PASS, parse, system};

use super::*;

fn render_infos(infos: &[ActionInfo]) -> String {
    infos
        .iter()
        .map(|info| {
            let field = info
                .frontier_field
                .as_ref()
                .map_or("-".to_owned(), ToString::to_string);
            format!(
                "{} {} parent={:?} field={} copy={:?}",
                info.t, info.action, info.parent_t, field, info.src_token_position
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn annotates_frontier_and_copies() {
    let system = system();
    let actions = system.get_actions(&parse(&system, IF_PASS_PASS)).unwrap();
    let src = ["if", "x", "then", "pass"];
    let infos = get_action_infos(&src, &actions, ActionInfoOptions::new()).unwrap();

    insta::assert_snapshot!(render_infos(&infos), @r"
    0 ApplyRule[Stmt -> If(Expr cond, Stmt* body)] parent=None field=- copy=None
    1 ApplyRule[Expr -> Var(ident name)] parent=Some(0) field=Expr cond copy=None
    2 GenToken[x] parent=Some(1) field=ident name copy=Some(1)
    3 ApplyRule[Stmt -> Pass] parent=Some(0) field=Stmt* body copy=None
    4 ApplyRule[Stmt -> Pass] parent=Some(0) field=Stmt* body copy=None
    5 Reduce parent=Some(0) field=Stmt* body copy=None
    ");
    assert!(infos[2].copy_from_src);
    assert_eq!(infos[1].frontier_prod.as_ref().map(|p| p.name()), Some("If"));
    assert!(infos.iter().filter(|i| i.t != 2).all(|i| !i.copy_from_src));
}

#[test]
fn first_occurrence_wins() {
    let system = system();
    let actions = system
        .get_actions(&parse(&system, "(Global (ident*-names b a))"))
        .unwrap();
    let src = vec!["a".to_owned(), "b".to_owned(), "a".to_owned()];
    let infos = get_action_infos(&src, &actions, ActionInfoOptions::new()).unwrap();
    assert_eq!(infos[1].src_token_position, Some(1));
    assert_eq!(infos[2].src_token_position, Some(0));
}

#[test]
fn missing_token_is_allowed_without_force_copy() {
    let system = system();
    let actions = system.get_actions(&parse(&system, IF_PASS_PASS)).unwrap();
    let infos = get_action_infos::<&str>(&[], &actions, ActionInfoOptions::new()).unwrap();
    assert_eq!(infos.len(), actions.len());
    assert!(!infos[2].copy_from_src);
}

#[test]
fn force_copy_requires_source_token() {
    let system = system();
    let actions = system.get_actions(&parse(&system, IF_PASS_PASS)).unwrap();
    let options = ActionInfoOptions::new().force_copy(true);
    assert!(options.get_force_copy());

    let err = get_action_infos(&["if", "y"], &actions, options).unwrap_err();
    insta::assert_snapshot!(err, @"cannot copy primitive token `x` from source");
    assert_eq!(err, TransitionError::CopyTokenNotFound("x".to_owned()));
}

#[test]
fn force_copy_exempts_stop_token() {
    let system = system();
    let actions = system
        .get_actions(&parse(&system, "(Doc (string-text big-SPACE-dog))"))
        .unwrap();
    let options = ActionInfoOptions::new().force_copy(true);
    let infos = get_action_infos(&["a", "big", "dog"], &actions, options).unwrap();
    assert_eq!(infos[3].action, Action::stop());
    assert!(!infos[3].copy_from_src);
}

#[test]
fn invalid_sequence_fails() {
    let err = get_action_infos::<&str>(&[], &[Action::Reduce], ActionInfoOptions::new()).unwrap_err();
    assert!(matches!(err, TransitionError::InvalidAction { .. }));
}
