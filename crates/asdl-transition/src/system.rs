//! The transition system: tree to actions, plus the continuation oracle.

use asdl_core::{Ast, Cardinality, Grammar, NodeId, Production, RealizedField};

use crate::action::{Action, ActionKind, STOP_TOKEN};
use crate::error::TransitionError;
use crate::hypothesis::Hypothesis;

/// Language-specific view of an ASDL grammar as a transition system.
///
/// Implementors supply the grammar and surface-code conversions; encoding
/// and the continuation oracle are provided.
pub trait TransitionSystem: Send + Sync {
    /// Registry name of the language.
    fn name(&self) -> &str;

    fn grammar(&self) -> &Grammar;

    /// Split surface code into tokens (used to match generated tokens against the source).
    fn tokenize_code(&self, code: &str) -> Vec<String>;

    fn surface_code_to_ast(&self, code: &str) -> Result<Ast, TransitionError>;

    fn ast_to_surface_code(&self, ast: &Ast) -> Result<String, TransitionError>;

    /// Linearize `ast` into the action sequence that rebuilds it.
    ///
    /// Deterministic and pure: the same tree always yields the same sequence.
    fn get_actions(&self, ast: &Ast) -> Result<Vec<Action>, TransitionError> {
        let mut actions = Vec::new();
        encode_node(self, ast, ast.root(), &mut actions)?;
        Ok(actions)
    }

    /// `GenToken` actions for the values of a primitive field.
    fn get_primitive_field_actions(&self, field: &RealizedField) -> Vec<Action> {
        default_primitive_field_actions(field)
    }

    /// Action kinds that may extend `hyp`.
    fn valid_continuation_types(&self, hyp: &Hypothesis) -> &'static [ActionKind] {
        hyp.continuation_kinds()
    }

    /// Productions an `ApplyRule` may use to extend `hyp`.
    ///
    /// Fails when the frontier field is primitive.
    fn valid_continuating_productions(
        &self,
        hyp: &Hypothesis,
    ) -> Result<&[Production], TransitionError> {
        let grammar = self.grammar();
        if hyp.tree().is_none() {
            return Ok(grammar.productions_for(grammar.root_type()));
        }
        let Some(field) = hyp.frontier_field() else {
            return Ok(&[]);
        };
        let ty = &field.field().ty;
        if grammar.is_composite_type(ty) {
            Ok(grammar.productions_for(ty))
        } else {
            Err(TransitionError::InvalidContinuationQuery(
                field.field().to_string(),
            ))
        }
    }

    fn compare_ast(&self, hyp_ast: &Ast, ref_ast: &Ast) -> bool {
        hyp_ast == ref_ast
    }

    /// Whether `hyp` is complete and matches `reference`.
    fn hyp_correct(&self, hyp: &Hypothesis, reference: &Ast) -> bool {
        hyp.is_complete() && hyp.tree().is_some_and(|tree| self.compare_ast(tree, reference))
    }
}

/// Whether a field's actions end with `Reduce`.
///
/// `multiple` fields are always closed explicitly; `optional` fields only
/// when they produced nothing.
pub fn needs_reduce(cardinality: Cardinality, produced_nothing: bool) -> bool {
    cardinality == Cardinality::Multiple || (cardinality == Cardinality::Optional && produced_nothing)
}

/// One `GenToken` per value; multi-token values are split on spaces and
/// terminated by the stop token.
pub fn default_primitive_field_actions(field: &RealizedField) -> Vec<Action> {
    let mut actions = Vec::new();
    for value in field.tokens() {
        if field.field().ty.is_multi_token() {
            actions.extend(value.split(' ').map(Action::gen_token));
            actions.push(Action::stop());
        } else {
            actions.push(Action::gen_token(value.as_str()));
        }
    }
    actions
}

fn encode_node<S: TransitionSystem + ?Sized>(
    system: &S,
    ast: &Ast,
    id: NodeId,
    out: &mut Vec<Action>,
) -> Result<(), TransitionError> {
    let node = ast.node(id);
    out.push(Action::ApplyRule(node.production().clone()));

    for field in node.fields() {
        if field.cardinality() == Cardinality::Single && !field.has_value() {
            return Err(TransitionError::MissingValue {
                constructor: node.production().name().to_owned(),
                field: field.name().to_owned(),
            });
        }

        let start = out.len();
        if system.grammar().is_composite_type(&field.field().ty) {
            for &child in field.nodes() {
                encode_node(system, ast, child, out)?;
            }
        } else {
            if holds_stop_token(field) {
                return Err(TransitionError::ReservedToken {
                    constructor: node.production().name().to_owned(),
                    field: field.name().to_owned(),
                });
            }
            out.extend(system.get_primitive_field_actions(field));
        }

        if needs_reduce(field.cardinality(), out.len() == start) {
            out.push(Action::Reduce);
        }
    }
    Ok(())
}

/// Whether a value would be read back as the end of a multi-token value.
fn holds_stop_token(field: &RealizedField) -> bool {
    let multi_token = field.field().ty.is_multi_token();
    field.tokens().iter().any(|value| {
        if multi_token {
            value.split(' ').any(|piece| piece == STOP_TOKEN)
        } else {
            value == STOP_TOKEN
        }
    })
}
