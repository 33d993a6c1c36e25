//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::ast::{Ast, AstNode, NodeId};

impl Ast {
    pub(crate) fn ensure_node(&self, id: NodeId) -> &AstNode {
        self.nodes.get(id.index()).unwrap_or_else(|| {
            panic!(
                "Ast: node {id} not found in a tree of {} nodes \
                 (node ids must come from the same tree)",
                self.nodes.len()
            )
        })
    }

    pub(crate) fn ensure_node_mut(&mut self, id: NodeId) -> &mut AstNode {
        let len = self.nodes.len();
        self.nodes.get_mut(id.index()).unwrap_or_else(|| {
            panic!(
                "Ast: node {id} not found in a tree of {len} nodes \
                 (node ids must come from the same tree)"
            )
        })
    }
}

/// Narrow an arena index to a node id.
pub(crate) fn ensure_node_index(index: usize) -> u32 {
    u32::try_from(index)
        .unwrap_or_else(|_| panic!("Ast: node index {index} exceeds the {} node limit", u32::MAX))
}
