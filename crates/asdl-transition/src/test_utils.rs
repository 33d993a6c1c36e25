//! Shared fixtures for transition tests.

use asdl_core::{Ast, Grammar, Production};
use indoc::indoc;

use crate::{Action, AsdlTransitionSystem, TransitionSystem};

pub const STMT_GRAMMAR: &str = indoc! {"
    ident, string

    Stmt = If(Expr cond, Stmt* body)
         | Pass
         | Return(Expr? value)
         | Doc(string text)
         | Global(ident* names)
         | Raise(ident? exc)
         | Assert(string? msg)
         | Print(string* values)
    Expr = Var(ident name)
"};

/// `If(cond=Var('x'), body=[Pass, Pass])`
pub const IF_PASS_PASS: &str = "(If (Expr-cond (Var (ident-name x))) (Stmt*-body (Pass) (Pass)))";

pub fn system() -> AsdlTransitionSystem {
    AsdlTransitionSystem::new(Grammar::from_text(STMT_GRAMMAR).unwrap())
}

pub fn production(system: &AsdlTransitionSystem, name: &str) -> Production {
    system.grammar().production_by_constructor(name).unwrap().clone()
}

pub fn parse(system: &AsdlTransitionSystem, sexp: &str) -> Ast {
    Ast::from_sexp(system.grammar(), sexp).unwrap()
}

/// One action per line.
pub fn render(actions: &[Action]) -> String {
    actions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
