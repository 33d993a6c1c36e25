//! Indexed grammar: productions grouped by type, plus stable id tables.

use std::collections::HashMap;
use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use super::error::GrammarError;
use super::types::{AsdlType, Field, Production};

/// A validated ASDL grammar.
///
/// Two views over the same productions:
/// - **Definition order**: `productions_for` returns a type's productions in
///   the order they were written; the first defined type is the root.
/// - **Id order**: productions, types and fields sorted by their rendering,
///   with dense ids for decoders that size output layers by them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "GrammarRepr", into = "GrammarRepr")]
pub struct Grammar {
    root_type: AsdlType,
    by_type: IndexMap<AsdlType, Vec<Production>>,
    by_constructor: HashMap<String, Production>,
    productions: IndexSet<Production>,
    types: IndexSet<AsdlType>,
    fields: IndexSet<Field>,
}

impl Grammar {
    /// Build a grammar from productions in definition order.
    pub fn new(productions: Vec<Production>) -> Result<Self, GrammarError> {
        let root_type = productions.first().ok_or(GrammarError::Empty)?.ty().clone();

        let mut by_type: IndexMap<AsdlType, Vec<Production>> = IndexMap::new();
        let mut by_constructor = HashMap::new();
        for production in &productions {
            if production.ty().is_primitive() {
                return Err(GrammarError::PrimitiveWithProductions(
                    production.ty().name().to_owned(),
                ));
            }
            if by_constructor
                .insert(production.name().to_owned(), production.clone())
                .is_some()
            {
                return Err(GrammarError::DuplicateConstructor(
                    production.name().to_owned(),
                ));
            }
            by_type
                .entry(production.ty().clone())
                .or_default()
                .push(production.clone());
        }

        let mut types: Vec<AsdlType> = by_type.keys().cloned().collect();
        let mut fields = Vec::new();
        for production in &productions {
            for field in production.fields() {
                if field.ty.is_composite() && !by_type.contains_key(&field.ty) {
                    return Err(GrammarError::UndefinedType {
                        ty: field.ty.name().to_owned(),
                        constructor: production.name().to_owned(),
                    });
                }
                types.push(field.ty.clone());
                fields.push(field.clone());
            }
        }

        let mut sorted_productions = productions;
        sorted_productions.sort_by_cached_key(|p| p.to_string());
        types.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.cmp(b)));
        fields.sort_by_cached_key(|f| f.to_string());

        Ok(Self {
            root_type,
            by_type,
            by_constructor,
            productions: sorted_productions.into_iter().collect(),
            types: types.into_iter().collect(),
            fields: fields.into_iter().collect(),
        })
    }

    /// Type whose productions may start a tree.
    pub fn root_type(&self) -> &AsdlType {
        &self.root_type
    }

    pub fn is_composite_type(&self, ty: &AsdlType) -> bool {
        ty.is_composite()
    }

    /// Productions of `ty` in definition order (empty for primitive or unknown types).
    pub fn productions_for(&self, ty: &AsdlType) -> &[Production] {
        self.by_type.get(ty).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn production_by_constructor(&self, name: &str) -> Option<&Production> {
        self.by_constructor.get(name)
    }

    /// All productions in id order.
    pub fn productions(&self) -> impl ExactSizeIterator<Item = &Production> {
        self.productions.iter()
    }

    pub fn production_id(&self, production: &Production) -> Option<usize> {
        self.productions.get_index_of(production)
    }

    pub fn production_by_id(&self, id: usize) -> Option<&Production> {
        self.productions.get_index(id)
    }

    /// All types (composite and primitive) in id order.
    pub fn types(&self) -> impl ExactSizeIterator<Item = &AsdlType> {
        self.types.iter()
    }

    pub fn type_id(&self, ty: &AsdlType) -> Option<usize> {
        self.types.get_index_of(ty)
    }

    pub fn type_by_id(&self, id: usize) -> Option<&AsdlType> {
        self.types.get_index(id)
    }

    /// All distinct fields in id order.
    pub fn fields(&self) -> impl ExactSizeIterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn field_id(&self, field: &Field) -> Option<usize> {
        self.fields.get_index_of(field)
    }

    pub fn field_by_id(&self, id: usize) -> Option<&Field> {
        self.fields.get_index(id)
    }

    pub fn primitive_types(&self) -> impl Iterator<Item = &AsdlType> {
        self.types.iter().filter(|t| t.is_primitive())
    }

    pub fn composite_types(&self) -> impl Iterator<Item = &AsdlType> {
        self.by_type.keys()
    }

    /// Number of productions.
    pub fn len(&self) -> usize {
        self.productions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.productions.is_empty()
    }

    /// Productions in definition order, grouped by type.
    fn definition_order(&self) -> impl Iterator<Item = &Production> {
        self.by_type.values().flatten()
    }
}

/// Renders the grammar back to ASDL text.
impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut primitives: IndexSet<&str> = IndexSet::new();
        for production in self.definition_order() {
            for field in production.fields() {
                if field.ty.is_primitive() {
                    primitives.insert(field.ty.name());
                }
            }
        }
        if !primitives.is_empty() {
            let header: Vec<&str> = primitives.into_iter().collect();
            writeln!(f, "{}", header.join(", "))?;
            writeln!(f)?;
        }

        for (ty, productions) in &self.by_type {
            let indent = " ".repeat(ty.name().len() + 1);
            for (i, production) in productions.iter().enumerate() {
                if i == 0 {
                    writeln!(f, "{ty} = {}", production.constructor())?;
                } else {
                    writeln!(f, "{indent}| {}", production.constructor())?;
                }
            }
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct GrammarRepr {
    productions: Vec<Production>,
}

impl From<Grammar> for GrammarRepr {
    fn from(grammar: Grammar) -> Self {
        Self {
            productions: grammar.definition_order().cloned().collect(),
        }
    }
}

impl TryFrom<GrammarRepr> for Grammar {
    type Error = GrammarError;

    fn try_from(repr: GrammarRepr) -> Result<Self, Self::Error> {
        Grammar::new(repr.productions)
    }
}
