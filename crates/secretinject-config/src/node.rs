//! Generic YAML document tree.
//!
//! Pipeline documents are walked structurally rather than deserialized into
//! typed pipeline structs, so any YAML shape the host accepts can be scanned.
//! The tree is built from parser events: scalars keep their literal text and
//! aliases stay aliases.

use crate::ConfigResult;
use yaml_rust2::parser::{Event, EventReceiver, Parser};

/// A node in a parsed YAML document.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Document root, wrapping a single child.
    Document(Box<Node>),
    /// Ordered list of children.
    Sequence(Vec<Node>),
    /// Key/value pairs in source order. Duplicate keys are kept.
    Mapping(Vec<(Node, Node)>),
    /// Leaf value, as written in the source.
    Scalar(String),
    /// Reference to an anchored node, by anchor id. Never dereferenced.
    Alias(usize),
}

impl Node {
    /// The scalar text, if this is a scalar.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Node::Scalar(value) => Some(value),
            _ => None,
        }
    }
}

/// Parse every YAML document in `text`.
///
/// Each document root is wrapped in [`Node::Document`]. Blank text holds no
/// documents.
pub fn parse_document(text: &str) -> ConfigResult<Vec<Node>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut builder = TreeBuilder::default();
    Parser::new(text.chars()).load(&mut builder, true)?;
    Ok(builder.documents)
}

/// Collection being filled while its events stream in.
enum Frame {
    Document(Option<Node>),
    Sequence(Vec<Node>),
    Mapping {
        entries: Vec<(Node, Node)>,
        key: Option<Node>,
    },
}

#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Frame>,
    documents: Vec<Node>,
}

impl TreeBuilder {
    fn push_node(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(Frame::Document(root)) => *root = Some(node),
            Some(Frame::Sequence(items)) => items.push(node),
            Some(Frame::Mapping { entries, key }) => match key.take() {
                Some(k) => entries.push((k, node)),
                None => *key = Some(node),
            },
            None => {}
        }
    }
}

impl EventReceiver for TreeBuilder {
    fn on_event(&mut self, ev: Event) {
        match ev {
            Event::DocumentStart { .. } => self.stack.push(Frame::Document(None)),
            Event::SequenceStart { .. } => self.stack.push(Frame::Sequence(Vec::new())),
            Event::MappingStart { .. } => self.stack.push(Frame::Mapping {
                entries: Vec::new(),
                key: None,
            }),
            Event::Scalar(value, ..) => self.push_node(Node::Scalar(value)),
            Event::Alias(id) => self.push_node(Node::Alias(id)),
            Event::SequenceEnd => {
                if let Some(Frame::Sequence(items)) = self.stack.pop() {
                    self.push_node(Node::Sequence(items));
                }
            }
            Event::MappingEnd => {
                if let Some(Frame::Mapping { entries, .. }) = self.stack.pop() {
                    self.push_node(Node::Mapping(entries));
                }
            }
            Event::DocumentEnd => {
                if let Some(Frame::Document(root)) = self.stack.pop() {
                    let root = root.unwrap_or_else(|| Node::Scalar(String::new()));
                    self.documents.push(Node::Document(Box::new(root)));
                }
            }
            _ => {}
        }
    }
}
