//! Node classification: text-bearing leaf or composite.

use crate::encoding::EncodingConfig;
use crate::syntax::SyntaxNode;

/// How the encoders treat a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeClass<'a> {
    /// Emit this text and treat the node as atomic.
    LeafText(&'a str),
    /// Emit structure only and descend into the children.
    Composite,
}

/// Classify `node` under `config`.
///
/// Identifiers always carry their name. Literals carry their raw value only
/// when literals are included; a suppressed literal is a composite with no
/// children. Every other node is composite regardless of child count.
pub fn classify<'a>(node: &'a SyntaxNode, config: &EncodingConfig) -> NodeClass<'a> {
    match node {
        SyntaxNode::Identifier { name } => NodeClass::LeafText(name),
        SyntaxNode::Literal { value } if config.include_literals => NodeClass::LeafText(value),
        SyntaxNode::Literal { .. } => NodeClass::Composite,
        SyntaxNode::Composite { .. } => NodeClass::Composite,
    }
}
