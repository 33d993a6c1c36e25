//! Lambda calculus (lambda DCS) logical forms, as used for ATIS/GEO-style
//! semantic parsing.
//!
//! ```text
//! ( lambda $0 e ( and ( flight $0 ) ( from $0 dallas:ci ) ) )
//! ```

mod convert;
mod logical_form;

#[cfg(test)]
mod convert_tests;
#[cfg(test)]
mod logical_form_tests;

use std::sync::{Arc, LazyLock};

use asdl_core::{Ast, Grammar};
use asdl_transition::{TransitionError, TransitionSystem};

use crate::System;

pub use logical_form::LogicalForm;

/// ASDL grammar of lambda DCS logical forms.
pub const GRAMMAR: &str = "\
# define primitive fields
var, ent, num, var_type, pred

expr = Variable(var variable)
     | Entity(ent entity)
     | Number(num number)
     | Apply(pred predicate, expr* arguments)
     | Argmax(var variable, expr domain, expr body)
     | Argmin(var variable, expr domain, expr body)
     | Count(var variable, expr body)
     | Exists(var variable, expr body)
     | Lambda(var variable, var_type type, expr body)
     | Max(var variable, expr body)
     | Min(var variable, expr body)
     | Sum(var variable, expr domain, expr body)
     | The(var variable, expr body)
     | Not(expr argument)
     | And(expr* arguments)
     | Or(expr* arguments)
     | Compare(cmp_op op, expr left, expr right)

cmp_op = GreaterThan | Equal | LessThan
";

/// The parsed built-in grammar.
pub fn grammar() -> &'static Grammar {
    static GRAMMAR_TABLE: LazyLock<Grammar> = LazyLock::new(|| {
        Grammar::from_text(GRAMMAR)
            .unwrap_or_else(|err| panic!("built-in lambda_dcs grammar is invalid: {err}"))
    });
    &GRAMMAR_TABLE
}

/// Shared transition system over the built-in grammar.
pub fn system() -> System {
    static SYSTEM: LazyLock<System> =
        LazyLock::new(|| Arc::new(LambdaCalculusTransitionSystem::new(grammar().clone())));
    Arc::clone(&SYSTEM)
}

/// Transition system whose surface code is a bracketed logical form.
#[derive(Debug, Clone)]
pub struct LambdaCalculusTransitionSystem {
    grammar: Grammar,
}

impl LambdaCalculusTransitionSystem {
    pub const NAME: &'static str = "lambda_dcs";

    pub fn new(grammar: Grammar) -> Self {
        Self { grammar }
    }
}

impl TransitionSystem for LambdaCalculusTransitionSystem {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    fn tokenize_code(&self, code: &str) -> Vec<String> {
        code.split_whitespace().map(str::to_owned).collect()
    }

    fn surface_code_to_ast(&self, code: &str) -> Result<Ast, TransitionError> {
        let form = LogicalForm::parse(code)?;
        convert::logical_form_to_ast(&self.grammar, &form)
    }

    fn ast_to_surface_code(&self, ast: &Ast) -> Result<String, TransitionError> {
        Ok(convert::ast_to_logical_form(ast)?.to_string())
    }

    /// Equal up to the order of `and`/`or` arguments.
    fn compare_ast(&self, hyp_ast: &Ast, ref_ast: &Ast) -> bool {
        match (
            convert::ast_to_logical_form(hyp_ast),
            convert::ast_to_logical_form(ref_ast),
        ) {
            (Ok(hyp), Ok(reference)) => hyp.canonical() == reference.canonical(),
            _ => false,
        }
    }
}

pub(crate) fn surface_error(message: impl Into<String>) -> TransitionError {
    TransitionError::SurfaceCode {
        language: LambdaCalculusTransitionSystem::NAME.to_owned(),
        message: message.into(),
    }
}
