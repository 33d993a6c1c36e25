//! Partial trees built one action at a time.

use asdl_core::{Ast, AstNode, Cardinality, NodeId, Production, RealizedField};
use log::trace;

use crate::action::{Action, ActionKind};
use crate::error::TransitionError;

/// Node and field index where the next action lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frontier {
    pub node: NodeId,
    pub field: usize,
}

/// Coarse lifecycle of a [`Hypothesis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HypothesisState {
    /// No action applied yet.
    Empty,
    /// Tree started, frontier set.
    Building,
    /// Every field of every node is finished.
    Complete,
}

/// A possibly incomplete tree plus the decoding state around it.
///
/// The `t`-th applied action creates nodes with created-time `t`, so the
/// root has time 0. Cloning copies the tree arena; clones evolve
/// independently.
#[derive(Debug, Clone, Default)]
pub struct Hypothesis {
    pub(crate) tree: Option<Ast>,
    pub(crate) frontier: Option<Frontier>,
    actions: Vec<Action>,
    /// Pieces of the multi-token value being generated.
    value_buffer: Vec<String>,
    score: f64,
}

impl Hypothesis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self) -> Option<&Ast> {
        self.tree.as_ref()
    }

    pub fn into_tree(self) -> Option<Ast> {
        self.tree
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Number of applied actions.
    pub fn t(&self) -> usize {
        self.actions.len()
    }

    pub fn frontier(&self) -> Option<Frontier> {
        self.frontier
    }

    pub fn frontier_node(&self) -> Option<&AstNode> {
        let frontier = self.frontier?;
        Some(self.tree.as_ref()?.node(frontier.node))
    }

    pub fn frontier_field(&self) -> Option<&RealizedField> {
        let frontier = self.frontier?;
        self.frontier_node()?.field(frontier.field)
    }

    pub fn value_buffer(&self) -> &[String] {
        &self.value_buffer
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn set_score(&mut self, score: f64) {
        self.score = score;
    }

    pub fn state(&self) -> HypothesisState {
        match (&self.tree, self.frontier) {
            (None, _) => HypothesisState::Empty,
            (Some(_), Some(_)) => HypothesisState::Building,
            (Some(_), None) => HypothesisState::Complete,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state() == HypothesisState::Complete
    }

    /// Action kinds that may be applied next.
    pub fn continuation_kinds(&self) -> &'static [ActionKind] {
        const APPLY: &[ActionKind] = &[ActionKind::ApplyRule];
        const APPLY_OR_REDUCE: &[ActionKind] = &[ActionKind::ApplyRule, ActionKind::Reduce];
        const GEN: &[ActionKind] = &[ActionKind::GenToken];
        const GEN_OR_REDUCE: &[ActionKind] = &[ActionKind::GenToken, ActionKind::Reduce];

        if self.tree.is_none() {
            return APPLY;
        }
        let Some(field) = self.frontier_field() else {
            return &[];
        };
        match (field.field().ty.is_composite(), field.cardinality()) {
            (true, Cardinality::Single) => APPLY,
            (true, _) => APPLY_OR_REDUCE,
            (false, Cardinality::Single) => GEN,
            (false, Cardinality::Optional) if !self.value_buffer.is_empty() => GEN,
            (false, _) => GEN_OR_REDUCE,
        }
    }

    /// Apply `action` in place.
    ///
    /// On error the hypothesis is left unchanged.
    pub fn apply_action(&mut self, action: Action) -> Result<(), TransitionError> {
        if !self.continuation_kinds().contains(&action.kind()) {
            return Err(self.invalid(&action, "action kind is not a valid continuation"));
        }

        let t = self.t();
        match &action {
            Action::ApplyRule(production) => self.apply_rule(&action, production.clone(), t)?,
            Action::GenToken(token) => self.gen_token(&action, token)?,
            Action::Reduce => self.reduce(&action)?,
        }

        trace!("t={t} applied {action}, frontier {:?}", self.frontier);
        self.actions.push(action);
        Ok(())
    }

    /// Deep-copy the hypothesis and apply `action` to the copy.
    pub fn clone_and_apply_action(&self, action: Action) -> Result<Self, TransitionError> {
        let mut next = self.clone();
        next.apply_action(action)?;
        Ok(next)
    }

    fn apply_rule(
        &mut self,
        action: &Action,
        production: Production,
        t: usize,
    ) -> Result<(), TransitionError> {
        let Some(frontier) = self.frontier else {
            let tree = self.tree.insert(Ast::new(production));
            let root = tree.root();
            self.advance_frontier(root);
            return Ok(());
        };

        let tree = self.ensure_tree_mut();
        let node = tree
            .attach(frontier.node, frontier.field, production)
            .map_err(|err| invalid_action(action, err.to_string()))?;
        tree.set_created_time(node, t);
        self.advance_frontier(node);
        Ok(())
    }

    fn gen_token(&mut self, action: &Action, token: &str) -> Result<(), TransitionError> {
        let frontier = self.ensure_frontier();
        let multi_token = self.frontier_field().is_some_and(|f| f.field().ty.is_multi_token());

        let value = if multi_token {
            if !action.is_stop_signal() {
                self.value_buffer.push(token.to_owned());
                return Ok(());
            }
            self.value_buffer.join(" ")
        } else if action.is_stop_signal() {
            return Err(self.invalid(action, "stop token on a single-token field"));
        } else {
            token.to_owned()
        };

        self.ensure_tree_mut()
            .add_token(frontier.node, frontier.field, value)
            .map_err(|err| invalid_action(action, err.to_string()))?;
        self.value_buffer.clear();

        let cardinality = self.frontier_field().map(RealizedField::cardinality);
        if cardinality != Some(Cardinality::Multiple) {
            self.close_frontier_field(frontier);
        }
        Ok(())
    }

    fn reduce(&mut self, action: &Action) -> Result<(), TransitionError> {
        let frontier = self.ensure_frontier();
        if !self.value_buffer.is_empty() {
            return Err(self.invalid(action, "a multi-token value is still open"));
        }
        self.close_frontier_field(frontier);
        Ok(())
    }

    fn close_frontier_field(&mut self, frontier: Frontier) {
        self.ensure_field_closed(frontier);
        self.advance_frontier(frontier.node);
    }

    /// Move the frontier to the first unfinished field at or above `node`.
    ///
    /// Fields before the frontier are finished with complete subtrees, so
    /// climbing from the last touched node finds the next depth-first slot.
    fn advance_frontier(&mut self, mut node: NodeId) {
        let tree = self.tree.as_ref();
        self.frontier = loop {
            let Some(current) = tree.map(|t| t.node(node)) else {
                break None;
            };
            if let Some(field) = current.first_unfinished_field() {
                break Some(Frontier { node, field });
            }
            match current.parent() {
                Some((parent, _)) => node = parent,
                None => break None,
            }
        };
    }

    fn invalid(&self, action: &Action, reason: &str) -> TransitionError {
        let state = match self.frontier_field() {
            Some(field) => format!("{reason} (frontier `{}`)", field.field()),
            None => format!("{reason} (hypothesis {:?})", self.state()),
        };
        invalid_action(action, state)
    }
}

fn invalid_action(action: &Action, reason: String) -> TransitionError {
    TransitionError::InvalidAction {
        action: action.to_string(),
        reason,
    }
}
