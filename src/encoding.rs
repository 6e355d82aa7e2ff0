//! Tree serialization: flat token sequences and parenthesized token trees.
//!
//! Both encodings walk the tree once, in preorder, children left to right.
//! Output is written incrementally to any `io::Write`; nothing is buffered
//! here beyond what the caller's writer does.
//!
//! Flat: `(define x (+ x 1))` becomes `define x + x 1`.
//!
//! Tree: the same form becomes `((define x (+ x 1 )))`. Each leaf token is
//! followed by one space, each composite is wrapped in parentheses.
//!
//! With subtokenization on, each leaf contributes its subtokens instead of its
//! raw text: Flat writes them as separate tokens, Tree brackets them per leaf,
//! so `(setKind x)` becomes `([set kind] [x] )`.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::classify::{classify, NodeClass};
use crate::subtoken::subtokenize_text;
use crate::syntax::SyntaxNode;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Which serialization to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingMode {
    /// Space-separated leaf tokens, structure discarded.
    #[default]
    Flat,
    /// Leaf tokens nested in parentheses following the tree shape.
    Tree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodingConfig {
    /// When false, literal values never appear in the output.
    pub include_literals: bool,
    pub mode: EncodingMode,
    /// Split each leaf into lowercase subtokens before writing it.
    #[serde(default)]
    pub subtokenize: bool,
}

impl EncodingConfig {
    pub fn new(mode: EncodingMode, include_literals: bool) -> Self {
        Self {
            include_literals,
            mode,
            subtokenize: false,
        }
    }

    pub fn flat(include_literals: bool) -> Self {
        Self::new(EncodingMode::Flat, include_literals)
    }

    pub fn tree(include_literals: bool) -> Self {
        Self::new(EncodingMode::Tree, include_literals)
    }

    pub fn subtokenized(mut self, subtokenize: bool) -> Self {
        self.subtokenize = subtokenize;
        self
    }
}

impl Default for EncodingConfig {
    fn default() -> Self {
        Self::flat(true)
    }
}

// ============================================================================
// PUBLIC API
// ============================================================================

/// Serialize `tree` into `out` using the configured encoding.
pub fn encode<W: Write + ?Sized>(
    tree: &SyntaxNode,
    config: &EncodingConfig,
    out: &mut W,
) -> io::Result<()> {
    match config.mode {
        EncodingMode::Flat => {
            let mut writer = FlatWriter::new(out);
            for_each_token(tree, config, &mut |token| writer.token(token))
        }
        EncodingMode::Tree => write_tree(tree, config, out),
    }
}

/// Call `emit` with every token the flat encoding writes, in order.
pub fn for_each_token<E>(
    tree: &SyntaxNode,
    config: &EncodingConfig,
    emit: &mut dyn FnMut(&str) -> Result<(), E>,
) -> Result<(), E> {
    match classify(tree, config) {
        NodeClass::LeafText(text) if !text.is_empty() => {
            if config.subtokenize {
                subtokenize_text(text)
                    .iter()
                    .try_for_each(|subtoken| emit(subtoken.as_str()))
            } else {
                emit(text)
            }
        }
        _ => tree
            .children()
            .iter()
            .try_for_each(|child| for_each_token(child, config, emit)),
    }
}

/// Serialize `tree` into a fresh string.
pub fn encode_to_string(tree: &SyntaxNode, config: &EncodingConfig) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec<u8> cannot fail.
    let _ = encode(tree, config, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

// ============================================================================
// FLAT ENCODING
// ============================================================================

struct FlatWriter<'a, W: ?Sized> {
    out: &'a mut W,
    tokens_written: usize,
}

impl<'a, W: Write + ?Sized> FlatWriter<'a, W> {
    fn new(out: &'a mut W) -> Self {
        Self {
            out,
            tokens_written: 0,
        }
    }

    fn token(&mut self, text: &str) -> io::Result<()> {
        if self.tokens_written > 0 {
            self.out.write_all(b" ")?;
        }
        self.out.write_all(text.as_bytes())?;
        self.tokens_written += 1;
        Ok(())
    }
}

// ============================================================================
// TREE ENCODING
// ============================================================================

fn write_tree<W: Write + ?Sized>(
    node: &SyntaxNode,
    config: &EncodingConfig,
    out: &mut W,
) -> io::Result<()> {
    match classify(node, config) {
        // Leaves are atomic: no parens, children never visited.
        NodeClass::LeafText(text) if !text.is_empty() => {
            if config.subtokenize {
                out.write_all(b"[")?;
                out.write_all(subtokenize_text(text).join(" ").as_bytes())?;
                out.write_all(b"]")?;
            } else {
                out.write_all(text.as_bytes())?;
            }
            out.write_all(b" ")
        }
        _ => {
            out.write_all(b"(")?;
            for child in node.children() {
                write_tree(child, config, out)?;
            }
            out.write_all(b")")
        }
    }
}
