//! JSON form of a grammar: the list of productions in definition order.
//!
//! ```json
//! {"productions": [{"type": {"Composite": "stmt"}, "constructor": {"name": "Pass", "fields": []}}]}
//! ```

use super::error::GrammarError;
use super::table::Grammar;

impl Grammar {
    /// Parse a grammar from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, GrammarError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the grammar to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, GrammarError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
