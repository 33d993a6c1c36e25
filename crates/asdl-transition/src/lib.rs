#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Transition system over ASDL grammars.
//!
//! An [`Ast`](asdl_core::Ast) is linearized into a sequence of [`Action`]s
//! (`get_actions`), and a [`Hypothesis`] rebuilds a tree one action at a
//! time while the [`TransitionSystem`] reports which actions may come next.

mod action;
mod action_info;
mod error;
mod generic;
mod hypothesis;
mod invariants;
mod system;
mod verify;

#[cfg(test)]
mod action_info_tests;
#[cfg(test)]
mod test_utils;

pub use action::{Action, ActionKind, STOP_TOKEN};
pub use action_info::{ActionInfo, ActionInfoOptions, get_action_infos};
pub use error::TransitionError;
pub use generic::AsdlTransitionSystem;
pub use hypothesis::{Frontier, Hypothesis, HypothesisState};
pub use system::{TransitionSystem, default_primitive_field_actions, needs_reduce};
pub use verify::{check_actions, verify_ast};
