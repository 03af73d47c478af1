// ── Value ─────────────────────────────────────────────────────────────────

/// A literal value on the right-hand side of a property.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Quoted string: `"Featured Projects"`
    Str(String),
    /// Numeric literal: `0.2`, `-50`, `3`
    Number(f32),
    /// `true` / `false`
    Bool(bool),
    /// Bare identifier: layout names, section ids, enum-like choices.
    Ident(String),
}

impl Value {
    /// Human-readable kind name for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Str(_) => "string",
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::Ident(_) => "identifier",
        }
    }
}

// ── Prop ──────────────────────────────────────────────────────────────────

/// A single `key: value` property inside a node block.
#[derive(Debug, Clone, PartialEq)]
pub struct Prop {
    pub key: String,
    pub value: Value,
}

// ── Node ──────────────────────────────────────────────────────────────────

/// One element of the page tree.
///
/// ```vpage
/// Item "AWS Production Platform" {
///     subtitle: "Terraform-Driven Infrastructure"
///     Tag "Terraform"
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Node kind: `Page`, `Section`, `Item`, `Link`, ...
    pub kind: String,
    /// Optional inline label (`Section "projects"`, `Tag "AWS"`).
    pub label: Option<String>,
    pub props: Vec<Prop>,
    pub children: Vec<Node>,
    /// 1-based line of the node's kind identifier.
    pub line: usize,
}

impl Node {
    /// Look up a property value by key. The last occurrence wins.
    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.iter().rev().find(|p| p.key == key).map(|p| &p.value)
    }

    /// Property as `f32` if it is a `Number`.
    pub fn prop_f32(&self, key: &str) -> Option<f32> {
        match self.prop(key)? {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Property as `&str` if it is a `Str` or `Ident`.
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        match self.prop(key)? {
            Value::Str(s) | Value::Ident(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn prop_bool(&self, key: &str) -> Option<bool> {
        match self.prop(key)? {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Children of a given kind, in document order.
    pub fn children_of<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |n| n.kind == kind)
    }
}

// ── PageDocument ──────────────────────────────────────────────────────────

/// The top-level parse result for a `.vpage` source file.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDocument {
    pub root: Node,
}
