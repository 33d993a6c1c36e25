#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for ASDL-driven code generation.
//!
//! Two layers:
//! - **Grammar**: types, constructors and productions read from ASDL text,
//!   with stable id tables and JSON/binary forms.
//! - **Ast**: arena trees instantiating the grammar, with an S-expression
//!   rendering that parses back.

pub mod ast;
pub mod grammar;

mod invariants;

pub use ast::{Ast, AstError, AstNode, FieldValue, NodeId, RealizedField};
pub use grammar::{
    AsdlType, Cardinality, Constructor, Field, Grammar, GrammarError, MULTI_TOKEN_TYPE, Production,
};
