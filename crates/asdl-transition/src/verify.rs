//! Replay checks tying encoding, the oracle and hypotheses together.

use asdl_core::Ast;
use log::debug;

use crate::action::Action;
use crate::error::TransitionError;
use crate::hypothesis::Hypothesis;
use crate::system::TransitionSystem;

/// Replay `actions` from an empty hypothesis, checking each one against the
/// continuation oracle. Returns the completed hypothesis.
pub fn check_actions(
    system: &dyn TransitionSystem,
    actions: &[Action],
) -> Result<Hypothesis, TransitionError> {
    let mismatch = |index: usize, action: &Action, reason: String| {
        TransitionError::StructuralMismatch {
            index,
            action: action.to_string(),
            reason,
        }
    };

    let mut hyp = Hypothesis::new();
    for (index, action) in actions.iter().enumerate() {
        let kinds = system.valid_continuation_types(&hyp);
        if !kinds.contains(&action.kind()) {
            return Err(mismatch(index, action, format!("expected one of {kinds:?}")));
        }
        if let Some(production) = action.production() {
            let productions = system.valid_continuating_productions(&hyp)?;
            if !productions.contains(production) {
                return Err(mismatch(
                    index,
                    action,
                    "production does not continue the frontier field".to_owned(),
                ));
            }
        }
        hyp.apply_action(action.clone())
            .map_err(|err| mismatch(index, action, err.to_string()))?;
    }

    if !hyp.is_complete() {
        let reason = match hyp.frontier_field() {
            Some(field) => format!("field `{}` is unfinished", field.field()),
            None => "no actions".to_owned(),
        };
        return Err(TransitionError::StructuralMismatch {
            index: actions.len(),
            action: "<end>".to_owned(),
            reason,
        });
    }
    Ok(hyp)
}

/// Encode `ast`, replay the actions, and require the rebuilt tree to equal it.
pub fn verify_ast(system: &dyn TransitionSystem, ast: &Ast) -> Result<Vec<Action>, TransitionError> {
    let actions = system.get_actions(ast)?;
    let hyp = check_actions(system, &actions)?;

    let rebuilt = hyp.tree();
    if rebuilt != Some(ast) {
        return Err(TransitionError::StructuralMismatch {
            index: actions.len(),
            action: "<end>".to_owned(),
            reason: format!(
                "rebuilt tree {} differs from {ast}",
                rebuilt.map(ToString::to_string).unwrap_or_default()
            ),
        });
    }

    debug!("{}: verified {} actions", system.name(), actions.len());
    Ok(actions)
}
