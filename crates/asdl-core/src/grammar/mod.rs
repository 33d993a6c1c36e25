//! ASDL grammars.
//!
//! Grammars are read from ASDL text, validated into a [`Grammar`], and can be
//! shipped in JSON or compact binary form.

mod binary;
mod error;
mod json;
mod lexer;
mod table;
mod text;
mod types;

#[cfg(test)]
mod table_tests;

pub use error::GrammarError;
pub use table::Grammar;
pub use types::{AsdlType, Cardinality, Constructor, Field, MULTI_TOKEN_TYPE, Production};
