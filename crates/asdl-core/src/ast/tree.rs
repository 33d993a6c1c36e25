use std::fmt;

use crate::grammar::{Cardinality, Field, Production};
use crate::invariants::ensure_node_index;

use super::error::AstError;

/// Index of a node inside its [`Ast`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Panics if `index` does not fit the id width.
    pub fn from_index(index: usize) -> Self {
        Self(ensure_node_index(index))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Value slot of a realized field, shaped by the field's type and cardinality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Composite `single`/`optional`.
    Node(Option<NodeId>),
    /// Composite `multiple`.
    Nodes(Vec<NodeId>),
    /// Primitive `single`/`optional`.
    Token(Option<String>),
    /// Primitive `multiple`.
    Tokens(Vec<String>),
}

impl FieldValue {
    fn empty_for(field: &Field) -> Self {
        match (field.ty.is_composite(), field.cardinality) {
            (true, Cardinality::Multiple) => Self::Nodes(Vec::new()),
            (true, _) => Self::Node(None),
            (false, Cardinality::Multiple) => Self::Tokens(Vec::new()),
            (false, _) => Self::Token(None),
        }
    }
}

/// A grammar field bound to its (possibly partial) value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealizedField {
    field: Field,
    value: FieldValue,
    closed: bool,
}

impl RealizedField {
    fn new(field: Field) -> Self {
        let value = FieldValue::empty_for(&field);
        Self {
            field,
            value,
            closed: false,
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn name(&self) -> &str {
        &self.field.name
    }

    pub fn cardinality(&self) -> Cardinality {
        self.field.cardinality
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Whether an `optional`/`multiple` field was explicitly closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Child nodes in order (empty for primitive fields).
    pub fn nodes(&self) -> &[NodeId] {
        match &self.value {
            FieldValue::Node(node) => node.as_slice(),
            FieldValue::Nodes(nodes) => nodes,
            FieldValue::Token(_) | FieldValue::Tokens(_) => &[],
        }
    }

    /// Tokens in order (empty for composite fields).
    pub fn tokens(&self) -> &[String] {
        match &self.value {
            FieldValue::Token(token) => token.as_slice(),
            FieldValue::Tokens(tokens) => tokens,
            FieldValue::Node(_) | FieldValue::Nodes(_) => &[],
        }
    }

    pub fn has_value(&self) -> bool {
        !self.nodes().is_empty() || !self.tokens().is_empty()
    }

    /// Whether the field takes no further values.
    ///
    /// `single` needs its value, `optional` a value or an explicit close,
    /// `multiple` always an explicit close.
    pub fn is_finished(&self) -> bool {
        match self.field.cardinality {
            Cardinality::Single => self.has_value(),
            Cardinality::Optional => self.has_value() || self.closed,
            Cardinality::Multiple => self.closed,
        }
    }

    fn accepts_value(&self) -> bool {
        !self.closed && (self.field.cardinality == Cardinality::Multiple || !self.has_value())
    }
}

/// One node of an [`Ast`].
#[derive(Debug, Clone)]
pub struct AstNode {
    production: Production,
    fields: Vec<RealizedField>,
    created_time: usize,
    parent: Option<(NodeId, usize)>,
}

impl AstNode {
    fn new(production: Production, parent: Option<(NodeId, usize)>) -> Self {
        let fields = production
            .fields()
            .iter()
            .cloned()
            .map(RealizedField::new)
            .collect();
        Self {
            production,
            fields,
            created_time: 0,
            parent,
        }
    }

    pub fn production(&self) -> &Production {
        &self.production
    }

    pub fn fields(&self) -> &[RealizedField] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&RealizedField> {
        self.fields.get(index)
    }

    pub fn field_by_name(&self, name: &str) -> Option<&RealizedField> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Index of the action that created this node while decoding (0 otherwise).
    pub fn created_time(&self) -> usize {
        self.created_time
    }

    /// Parent node and the index of the field holding this node.
    pub fn parent(&self) -> Option<(NodeId, usize)> {
        self.parent
    }

    /// First field, in declaration order, that still takes values.
    pub fn first_unfinished_field(&self) -> Option<usize> {
        self.fields.iter().position(|f| !f.is_finished())
    }

    fn slot(&self, index: usize) -> Result<&RealizedField, AstError> {
        self.fields.get(index).ok_or_else(|| AstError::FieldOutOfRange {
            constructor: self.production.name().to_owned(),
            index,
        })
    }

    fn slot_error(&self, field: &RealizedField) -> AstError {
        AstError::SlotFilled {
            constructor: self.production.name().to_owned(),
            field: field.name().to_owned(),
        }
    }
}

/// Tree of [`AstNode`]s stored in an arena, rooted at the first node.
///
/// Equality is structural: productions and field values are compared
/// recursively; creation times and close markers are ignored.
#[derive(Debug, Clone)]
pub struct Ast {
    pub(crate) nodes: Vec<AstNode>,
}

impl Ast {
    /// Tree with a single root node for `production`.
    pub fn new(production: Production) -> Self {
        Self {
            nodes: vec![AstNode::new(production, None)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn root_node(&self) -> &AstNode {
        self.ensure_node(self.root())
    }

    pub fn node(&self, id: NodeId) -> &AstNode {
        self.ensure_node(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&AstNode> {
        self.nodes.get(id.index())
    }

    /// Number of nodes.
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    /// Node ids in creation order.
    pub fn node_ids(&self) -> impl ExactSizeIterator<Item = NodeId> + use<> {
        (0..self.nodes.len()).map(NodeId::from_index)
    }

    /// Create a node for `production` inside field `field_index` of `parent`.
    ///
    /// The field must be composite, of the production's type, and still
    /// accept values (`multiple` fields append).
    pub fn attach(
        &mut self,
        parent: NodeId,
        field_index: usize,
        production: Production,
    ) -> Result<NodeId, AstError> {
        let parent_node = self.ensure_node(parent);
        let slot = parent_node.slot(field_index)?;
        if !slot.field.ty.is_composite() {
            return Err(AstError::NotComposite {
                constructor: parent_node.production.name().to_owned(),
                field: slot.name().to_owned(),
            });
        }
        if production.ty() != &slot.field.ty {
            return Err(AstError::TypeMismatch {
                field: slot.field.to_string(),
                expected: slot.field.ty.name().to_owned(),
                production: production.to_string(),
            });
        }
        if !slot.accepts_value() {
            return Err(parent_node.slot_error(slot));
        }

        let id = NodeId::from_index(self.nodes.len());
        self.nodes
            .push(AstNode::new(production, Some((parent, field_index))));
        match &mut self.ensure_node_mut(parent).fields[field_index].value {
            FieldValue::Node(node) => *node = Some(id),
            FieldValue::Nodes(nodes) => nodes.push(id),
            FieldValue::Token(_) | FieldValue::Tokens(_) => unreachable!("checked composite"),
        }
        Ok(id)
    }

    /// Store a token in primitive field `field_index` of `node`.
    pub fn add_token(
        &mut self,
        node: NodeId,
        field_index: usize,
        token: impl Into<String>,
    ) -> Result<(), AstError> {
        let owner = self.ensure_node(node);
        let slot = owner.slot(field_index)?;
        if slot.field.ty.is_composite() {
            return Err(AstError::NotPrimitive {
                constructor: owner.production.name().to_owned(),
                field: slot.name().to_owned(),
            });
        }
        if !slot.accepts_value() {
            return Err(owner.slot_error(slot));
        }

        match &mut self.ensure_node_mut(node).fields[field_index].value {
            FieldValue::Token(value) => *value = Some(token.into()),
            FieldValue::Tokens(values) => values.push(token.into()),
            FieldValue::Node(_) | FieldValue::Nodes(_) => unreachable!("checked primitive"),
        }
        Ok(())
    }

    /// Mark field `field_index` of `node` as taking no further values.
    pub fn close_field(&mut self, node: NodeId, field_index: usize) -> Result<(), AstError> {
        self.ensure_node(node).slot(field_index)?;
        self.ensure_node_mut(node).fields[field_index].closed = true;
        Ok(())
    }

    pub fn set_created_time(&mut self, node: NodeId, time: usize) {
        self.ensure_node_mut(node).created_time = time;
    }

    /// Structural equality of the subtree at `id` with the subtree at `other_id` of `other`.
    pub fn subtree_eq(&self, id: NodeId, other: &Ast, other_id: NodeId) -> bool {
        let (a, b) = (self.node(id), other.node(other_id));
        if a.production != b.production || a.fields.len() != b.fields.len() {
            return false;
        }
        a.fields.iter().zip(&b.fields).all(|(fa, fb)| {
            fa.tokens() == fb.tokens()
                && fa.nodes().len() == fb.nodes().len()
                && fa
                    .nodes()
                    .iter()
                    .zip(fb.nodes())
                    .all(|(&ca, &cb)| self.subtree_eq(ca, other, cb))
        })
    }
}

impl PartialEq for Ast {
    fn eq(&self, other: &Self) -> bool {
        self.subtree_eq(self.root(), other, other.root())
    }
}

impl Eq for Ast {}
