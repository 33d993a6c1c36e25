//! Binary serialization for grammars using postcard.

use super::error::GrammarError;
use super::table::Grammar;

impl Grammar {
    /// Deserialize a grammar from its compact binary form.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, GrammarError> {
        Ok(postcard::from_bytes(bytes)?)
    }

    /// Serialize the grammar to its compact binary form.
    pub fn to_binary(&self) -> Result<Vec<u8>, GrammarError> {
        Ok(postcard::to_allocvec(self)?)
    }
}
