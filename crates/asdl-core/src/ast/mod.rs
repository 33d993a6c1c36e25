//! Arena-backed abstract syntax trees over an ASDL [`Grammar`](crate::Grammar).
//!
//! Nodes live in a single `Vec` owned by the [`Ast`]; children are referenced
//! by [`NodeId`]. Cloning an `Ast` copies the whole arena, so two clones never
//! share nodes.

mod error;
mod sexp;
mod tree;


pub use error::AstError;
pub use sexp::SPACE_ESCAPE;
pub use tree::{Ast, AstNode, FieldValue, NodeId, RealizedField};
