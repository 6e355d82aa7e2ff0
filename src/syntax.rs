//! Syntax module for the corpus miner
//!
//! Provides the language-independent syntax tree the encoders read, and the
//! `SourceParser` seam through which a concrete grammar produces it.

use std::path::Path;

use crate::errors::ParseError;

pub mod parser;

pub use parser::SutraParser;

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// A node of a parsed syntax tree.
///
/// Only two leaf kinds carry text. Everything else is a composite, whatever
/// its child count, and is identified by the grammar rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxNode {
    /// A name: symbol, identifier, dotted path.
    Identifier { name: String },
    /// A literal, holding its raw source text (quotes included for strings).
    Literal { value: String },
    /// Any other grammatical category.
    Composite {
        kind: &'static str,
        children: Vec<SyntaxNode>,
    },
}

impl SyntaxNode {
    pub fn identifier(name: impl Into<String>) -> Self {
        SyntaxNode::Identifier { name: name.into() }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        SyntaxNode::Literal {
            value: value.into(),
        }
    }

    pub fn composite(kind: &'static str, children: Vec<SyntaxNode>) -> Self {
        SyntaxNode::Composite { kind, children }
    }

    /// Ordered children in grammar order. Leaves have none.
    pub fn children(&self) -> &[SyntaxNode] {
        match self {
            SyntaxNode::Composite { children, .. } => children,
            SyntaxNode::Identifier { .. } | SyntaxNode::Literal { .. } => &[],
        }
    }
}

// ============================================================================
// PARSER SEAM
// ============================================================================

/// Turns the text of one source file into a syntax tree.
///
/// The corpus builder depends only on this trait, so any language with an
/// obtainable syntax tree can be mined by supplying an implementation.
pub trait SourceParser {
    /// Parse `source`, read from `path`, into the root node of its tree.
    fn parse(&self, path: &Path, source: &str) -> Result<SyntaxNode, ParseError>;
}

impl<P: SourceParser + ?Sized> SourceParser for &P {
    fn parse(&self, path: &Path, source: &str) -> Result<SyntaxNode, ParseError> {
        (**self).parse(path, source)
    }
}
