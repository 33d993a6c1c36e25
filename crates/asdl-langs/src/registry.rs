//! Language identifiers mapped to transition system factories.

use std::collections::HashMap;

use asdl_core::Grammar;
use asdl_transition::TransitionError;
use log::debug;

use crate::System;

/// Builds a transition system for a grammar.
pub type Factory = fn(Grammar) -> System;

/// A registered language.
#[derive(Debug, Clone)]
pub struct LangEntry {
    name: String,
    aliases: Vec<String>,
    factory: Factory,
}

impl LangEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn create(&self, grammar: Grammar) -> System {
        debug!("creating `{}` transition system ({} productions)", self.name, grammar.len());
        (self.factory)(grammar)
    }
}

/// Case-insensitive lookup from names and aliases to [`LangEntry`]s.
///
/// Registering a name or alias again points it at the newer entry.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<LangEntry>,
    by_name: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, name: &str, aliases: &[&str], factory: Factory) -> &mut Self {
        let index = self.entries.len();
        self.entries.push(LangEntry {
            name: name.to_owned(),
            aliases: aliases.iter().map(|a| (*a).to_owned()).collect(),
            factory,
        });
        for key in std::iter::once(name).chain(aliases.iter().copied()) {
            self.by_name.insert(key.to_ascii_lowercase(), index);
        }
        self
    }

    pub fn lookup(&self, lang: &str) -> Option<&LangEntry> {
        let index = *self.by_name.get(&lang.to_ascii_lowercase())?;
        self.entries.get(index)
    }

    pub fn contains(&self, lang: &str) -> bool {
        self.lookup(lang).is_some()
    }

    /// Build the transition system registered under `lang`.
    pub fn create(&self, lang: &str, grammar: Grammar) -> Result<System, TransitionError> {
        let entry = self
            .lookup(lang)
            .ok_or_else(|| TransitionError::UnsupportedLanguage(lang.to_owned()))?;
        Ok(entry.create(grammar))
    }

    /// Canonical names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(LangEntry::name)
    }
}
