use crate::tag::Tag;
use bitflags::bitflags;
use garnet_common::SourcePosition;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Per-node flags set by the parser.
    ///
    /// Only statement sequences (`begin`, `kwbegin`) may carry flags; see
    /// [`AstNode::with_flags`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct NodeFlags: u8 {
        /// Always wrap the sequence in a self-invoking function when its
        /// value is needed.
        const FORCE_WRAP = 1 << 0;
        /// Elements are values separated by commas, not statements.
        const INLINE_BLOCK = 1 << 1;
    }
}

/// A literal payload stored directly in a node's children.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
    /// Identifier-like payload: symbol names, variable names, method names,
    /// regexp flag letters.
    Name(String),
}

impl Literal {
    /// Text payload of a `Str` or `Name` literal.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Literal::Str(s) | Literal::Name(s) => Some(s),
            Literal::Int(_) | Literal::Float(_) => None,
        }
    }
}

/// One child slot. Order is semantically significant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Child {
    Node(AstNode),
    Literal(Literal),
    /// Absent optional child (`if` without `else`, `class` without superclass).
    Empty,
}

impl Child {
    #[must_use]
    pub fn as_node(&self) -> Option<&AstNode> {
        match self {
            Child::Node(node) => Some(node),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Child::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Child::Empty)
    }
}

impl From<AstNode> for Child {
    fn from(node: AstNode) -> Self {
        Child::Node(node)
    }
}

impl From<Literal> for Child {
    fn from(lit: Literal) -> Self {
        Child::Literal(lit)
    }
}

impl From<Option<AstNode>> for Child {
    fn from(node: Option<AstNode>) -> Self {
        node.map_or(Child::Empty, Child::Node)
    }
}

/// Flags were attached to a node kind that does not accept them.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("flags {flags:?} are not valid on '{kind}' nodes")]
pub struct InvalidFlags {
    pub kind: Tag,
    pub flags: NodeFlags,
}

/// A parsed program node.
///
/// Deserialization applies the same flag check as [`AstNode::with_flags`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAstNode")]
pub struct AstNode {
    pub kind: Tag,
    pub children: Vec<Child>,
    #[serde(skip_serializing_if = "NodeFlags::is_empty")]
    pub flags: NodeFlags,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<SourcePosition>,
}

/// Wire form of [`AstNode`] before its flags are checked.
#[derive(Deserialize)]
struct RawAstNode {
    kind: Tag,
    #[serde(default)]
    children: Vec<Child>,
    #[serde(default)]
    flags: NodeFlags,
    #[serde(default)]
    position: Option<SourcePosition>,
}

impl TryFrom<RawAstNode> for AstNode {
    type Error = InvalidFlags;

    fn try_from(raw: RawAstNode) -> Result<Self, Self::Error> {
        AstNode::new(raw.kind, raw.children)
            .with_position(raw.position)
            .with_flags(raw.flags)
    }
}

impl AstNode {
    pub fn new(kind: Tag, children: impl IntoIterator<Item = Child>) -> Self {
        Self {
            kind,
            children: children.into_iter().collect(),
            flags: NodeFlags::empty(),
            position: None,
        }
    }

    /// Attach a source position.
    #[must_use]
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.position = Some(SourcePosition::new(line, column));
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: Option<SourcePosition>) -> Self {
        self.position = position;
        self
    }

    /// Attach flags, rejecting them on kinds other than statement sequences.
    pub fn with_flags(mut self, flags: NodeFlags) -> Result<Self, InvalidFlags> {
        if !flags.is_empty() && !self.kind.is_sequence() {
            return Err(InvalidFlags {
                kind: self.kind,
                flags,
            });
        }
        self.flags = flags;
        Ok(self)
    }

    /// Derive a new node with the same position and flags.
    ///
    /// `kind` of `None` keeps the current kind.
    #[must_use]
    pub fn updated(&self, kind: Option<Tag>, children: Vec<Child>) -> Self {
        Self {
            kind: kind.unwrap_or(self.kind),
            children,
            flags: self.flags,
            position: self.position,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    #[must_use]
    pub fn child(&self, idx: usize) -> Option<&Child> {
        self.children.get(idx)
    }

    #[must_use]
    pub fn node_at(&self, idx: usize) -> Option<&AstNode> {
        self.children.get(idx).and_then(Child::as_node)
    }

    #[must_use]
    pub fn literal_at(&self, idx: usize) -> Option<&Literal> {
        self.children.get(idx).and_then(Child::as_literal)
    }

    /// Text of the first child when it is a `Str`/`Name` literal.
    ///
    /// This is the payload of `str`, `sym`, `lvar`, `ivar`, `gvar` nodes.
    #[must_use]
    pub fn text_value(&self) -> Option<&str> {
        self.literal_at(0).and_then(Literal::as_text)
    }

    /// Last child, when it is a node.
    #[must_use]
    pub fn last_node(&self) -> Option<&AstNode> {
        self.children.last().and_then(Child::as_node)
    }

    pub fn has_flag(&self, flag: NodeFlags) -> bool {
        self.flags.contains(flag)
    }
}
