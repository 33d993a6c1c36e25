//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use asdl_core::Ast;

use crate::hypothesis::{Frontier, Hypothesis};

impl Hypothesis {
    pub(crate) fn ensure_tree_mut(&mut self) -> &mut Ast {
        self.tree
            .as_mut()
            .unwrap_or_else(|| panic!("Hypothesis: tree accessed before the first ApplyRule"))
    }

    pub(crate) fn ensure_frontier(&self) -> Frontier {
        self.frontier.unwrap_or_else(|| {
            panic!("Hypothesis: no frontier although the oracle admitted the action")
        })
    }

    pub(crate) fn ensure_field_closed(&mut self, frontier: Frontier) {
        if let Err(err) = self.ensure_tree_mut().close_field(frontier.node, frontier.field) {
            panic!("Hypothesis: frontier {frontier:?} is not a field of its node: {err}");
        }
    }
}
