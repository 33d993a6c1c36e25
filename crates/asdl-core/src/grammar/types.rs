//! Grammar type definitions.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Name of the primitive type whose values span several tokens.
///
/// Values of this type are emitted piece by piece and terminated by an
/// explicit stop token; every other primitive type takes exactly one token.
pub const MULTI_TOKEN_TYPE: &str = "string";

/// Per-field multiplicity constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    /// Exactly one value.
    Single,
    /// Zero or one value (`?`).
    Optional,
    /// Zero or more values (`*`).
    Multiple,
}

impl Cardinality {
    /// Suffix used after the type name in ASDL text.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Single => "",
            Self::Optional => "?",
            Self::Multiple => "*",
        }
    }

    pub fn is_single(self) -> bool {
        self == Self::Single
    }

    /// `optional` and `multiple` fields are the ones a `Reduce` may close.
    pub fn is_reducible(self) -> bool {
        !self.is_single()
    }
}

/// A type referenced by a grammar: either a leaf-valued primitive or a
/// composite type expanded through productions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AsdlType {
    Primitive(String),
    Composite(String),
}

impl AsdlType {
    pub fn name(&self) -> &str {
        match self {
            Self::Primitive(name) | Self::Composite(name) => name,
        }
    }

    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Composite(_))
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }

    /// Whether values of this type are generated as a token sequence closed by a stop token.
    pub fn is_multi_token(&self) -> bool {
        matches!(self, Self::Primitive(name) if name == MULTI_TOKEN_TYPE)
    }
}

impl fmt::Display for AsdlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A named, typed slot of a constructor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: AsdlType,
    pub cardinality: Cardinality,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: AsdlType, cardinality: Cardinality) -> Self {
        Self {
            name: name.into(),
            ty,
            cardinality,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{} {}", self.ty, self.cardinality.suffix(), self.name)
    }
}

/// Constructor name plus its ordered fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Constructor {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Constructor {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

impl fmt::Display for Constructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.fields.is_empty() {
            return Ok(());
        }
        f.write_str("(")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}")?;
        }
        f.write_str(")")
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
struct ProductionData {
    #[serde(rename = "type")]
    ty: AsdlType,
    constructor: Constructor,
}

/// A grammar rule: composite type on the left, constructor on the right.
///
/// Cloning is cheap (shared). Equality and hashing compare the rule itself,
/// so productions from two parses of the same grammar text are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Production(Arc<ProductionData>);

impl Production {
    pub fn new(ty: AsdlType, constructor: Constructor) -> Self {
        Self(Arc::new(ProductionData { ty, constructor }))
    }

    /// Left-hand side type.
    pub fn ty(&self) -> &AsdlType {
        &self.0.ty
    }

    pub fn constructor(&self) -> &Constructor {
        &self.0.constructor
    }

    /// Constructor name.
    pub fn name(&self) -> &str {
        &self.0.constructor.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.0.constructor.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.0.constructor.field(name)
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.0.constructor.field_index(name)
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.0.ty, self.0.constructor)
    }
}
