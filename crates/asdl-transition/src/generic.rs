//! Grammar-agnostic transition system whose surface code is the tree's
//! S-expression form.

use asdl_core::{Ast, Grammar};

use crate::error::TransitionError;
use crate::system::TransitionSystem;

/// Works with any grammar: `(Ctor (type-field value ...) ...)` is parsed
/// and printed by [`Ast`] itself.
#[derive(Debug, Clone)]
pub struct AsdlTransitionSystem {
    grammar: Grammar,
}

impl AsdlTransitionSystem {
    pub const NAME: &'static str = "asdl";

    pub fn new(grammar: Grammar) -> Self {
        Self { grammar }
    }
}

impl TransitionSystem for AsdlTransitionSystem {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Parentheses become tokens of their own.
    fn tokenize_code(&self, code: &str) -> Vec<String> {
        code.replace('(', " ( ")
            .replace(')', " ) ")
            .split_whitespace()
            .map(str::to_owned)
            .collect()
    }

    fn surface_code_to_ast(&self, code: &str) -> Result<Ast, TransitionError> {
        Ok(Ast::from_sexp(&self.grammar, code)?)
    }

    fn ast_to_surface_code(&self, ast: &Ast) -> Result<String, TransitionError> {
        Ok(ast.to_string())
    }
}
