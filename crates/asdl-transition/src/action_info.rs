//! Per-action decoding annotations.

use asdl_core::{Field, Production};
use log::debug;

use crate::action::Action;
use crate::error::TransitionError;
use crate::hypothesis::Hypothesis;

/// Options for [`get_action_infos`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionInfoOptions {
    force_copy: bool,
}

impl ActionInfoOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require every generated token to occur in the source.
    ///
    /// The stop token is exempt: it ends a multi-token value and never
    /// appears in source text. Annotators that reject any uncopyable
    /// `GenToken`, the stop token included, will disagree here.
    pub fn force_copy(mut self, force_copy: bool) -> Self {
        self.force_copy = force_copy;
        self
    }

    pub fn get_force_copy(&self) -> bool {
        self.force_copy
    }
}

/// An action together with where it lands in the partial tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionInfo {
    /// Index of the action in its sequence.
    pub t: usize,
    pub action: Action,
    /// Created-time of the frontier node (none for the first action).
    pub parent_t: Option<usize>,
    pub frontier_prod: Option<Production>,
    pub frontier_field: Option<Field>,
    /// `GenToken` whose token occurs in the source query.
    pub copy_from_src: bool,
    /// First source position of the token when `copy_from_src` is set.
    pub src_token_position: Option<usize>,
}

/// Replay `actions` from an empty hypothesis, annotating each one.
pub fn get_action_infos<S: AsRef<str>>(
    src_query: &[S],
    actions: &[Action],
    options: ActionInfoOptions,
) -> Result<Vec<ActionInfo>, TransitionError> {
    let mut hyp = Hypothesis::new();
    let mut infos = Vec::with_capacity(actions.len());

    for (t, action) in actions.iter().enumerate() {
        let mut info = ActionInfo {
            t,
            action: action.clone(),
            parent_t: None,
            frontier_prod: None,
            frontier_field: None,
            copy_from_src: false,
            src_token_position: None,
        };
        if let (Some(node), Some(field)) = (hyp.frontier_node(), hyp.frontier_field()) {
            info.parent_t = Some(node.created_time());
            info.frontier_prod = Some(node.production().clone());
            info.frontier_field = Some(field.field().clone());
        }

        if let Some(token) = action.token() {
            info.src_token_position = src_query.iter().position(|src| src.as_ref() == token);
            info.copy_from_src = info.src_token_position.is_some();
            if !info.copy_from_src && options.force_copy && !action.is_stop_signal() {
                return Err(TransitionError::CopyTokenNotFound(token.to_owned()));
            }
        }

        hyp.apply_action(action.clone())?;
        infos.push(info);
    }

    debug!(
        "annotated {} actions, {} copied from source",
        infos.len(),
        infos.iter().filter(|info| info.copy_from_src).count()
    );
    Ok(infos)
}
