//! Sutra Parser - pest grammar to `SyntaxNode`
//!
//! Converts Sutra script text into the generic syntax tree mined by the
//! encoders. Purely syntactic: symbols become identifiers, numbers, strings
//! and booleans become literals carrying their raw text, and every bracketed
//! form becomes a composite tagged with its rule name.

use std::path::Path;

use pest::{error::Error, iterators::Pair, Parser};
use pest_derive::Parser;

use crate::errors::ParseError;
use crate::syntax::{SourceParser, SyntaxNode};

#[derive(Parser)]
#[grammar = "syntax/grammar.pest"]
struct SutraGrammar;

// ============================================================================
// PUBLIC API
// ============================================================================

/// The bundled parser for `.sutra` scripts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SutraParser;

impl SourceParser for SutraParser {
    fn parse(&self, path: &Path, source: &str) -> Result<SyntaxNode, ParseError> {
        parse(path, source)
    }
}

/// Parse Sutra source into a `program` composite holding the top-level forms.
pub fn parse(path: &Path, source: &str) -> Result<SyntaxNode, ParseError> {
    let mut pairs = SutraGrammar::parse(Rule::program, source)
        .map_err(|e| convert_parse_error(e, path, source))?;

    let Some(program) = pairs.next() else {
        return Err(ParseError::new(path, source, "empty parse result", (0, 0)));
    };
    build_node(program, path, source)
}

// ============================================================================
// TREE BUILDERS
// ============================================================================

fn build_node(pair: Pair<Rule>, path: &Path, source: &str) -> Result<SyntaxNode, ParseError> {
    match pair.as_rule() {
        Rule::symbol => Ok(SyntaxNode::identifier(pair.as_str())),

        Rule::number | Rule::string | Rule::boolean => Ok(SyntaxNode::literal(pair.as_str())),

        Rule::program | Rule::list | Rule::block | Rule::quote | Rule::spread_arg => {
            let kind = composite_kind(pair.as_rule());
            let children = pair
                .into_inner()
                .filter(|p| p.as_rule() != Rule::EOI)
                .map(|p| build_node(p, path, source))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(SyntaxNode::composite(kind, children))
        }

        rule => {
            let span = pair.as_span();
            Err(ParseError::new(
                path,
                source,
                format!("unsupported rule: {:?}", rule),
                (span.start(), span.end() - span.start()),
            ))
        }
    }
}

fn composite_kind(rule: Rule) -> &'static str {
    match rule {
        Rule::program => "program",
        Rule::list => "list",
        Rule::block => "block",
        Rule::quote => "quote",
        Rule::spread_arg => "spread",
        _ => "unknown",
    }
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

fn convert_parse_error(error: Error<Rule>, path: &Path, source: &str) -> ParseError {
    let (start, len) = match error.location {
        pest::error::InputLocation::Pos(pos) => (pos, 0),
        pest::error::InputLocation::Span((start, end)) => (start, end - start),
    };

    let message = error.variant.message().into_owned();
    let err = ParseError::new(path, source, message, (start, len));

    if start >= source.len() {
        err.with_help("input ended early; look for an unclosed '(', '{' or '\"'")
    } else {
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(source: &str) -> Result<SyntaxNode, ParseError> {
        parse(Path::new("test.sutra"), source)
    }

    #[test]
    fn test_empty_input() {
        let tree = parse_str("").unwrap();
        assert_eq!(tree, SyntaxNode::composite("program", vec![]));
    }

    #[test]
    fn test_simple_list() {
        let tree = parse_str("(define x 1)").unwrap();
        assert_eq!(
            tree,
            SyntaxNode::composite(
                "program",
                vec![SyntaxNode::composite(
                    "list",
                    vec![
                        SyntaxNode::identifier("define"),
                        SyntaxNode::identifier("x"),
                        SyntaxNode::literal("1"),
                    ]
                )]
            )
        );
    }

    #[test]
    fn test_literals_keep_raw_text() {
        let tree = parse_str(r#"(print "hi\n" -2.5 true)"#).unwrap();
        let list = &tree.children()[0];
        assert_eq!(list.children()[1], SyntaxNode::literal(r#""hi\n""#));
        assert_eq!(list.children()[2], SyntaxNode::literal("-2.5"));
        assert_eq!(list.children()[3], SyntaxNode::literal("true"));
    }

    #[test]
    fn test_dotted_path_is_one_identifier() {
        let tree = parse_str("player.health").unwrap();
        assert_eq!(tree.children(), &[SyntaxNode::identifier("player.health")]);
    }

    #[test]
    fn test_symbols_that_look_like_literals() {
        let tree = parse_str("(trueish - -x)").unwrap();
        let list = &tree.children()[0];
        assert_eq!(
            list.children(),
            &[
                SyntaxNode::identifier("trueish"),
                SyntaxNode::identifier("-"),
                SyntaxNode::identifier("-x"),
            ]
        );
    }

    #[test]
    fn test_quote_block_and_spread() {
        let tree = parse_str("'(a) {f ...rest}").unwrap();
        assert_eq!(
            tree.children(),
            &[
                SyntaxNode::composite(
                    "quote",
                    vec![SyntaxNode::composite("list", vec![SyntaxNode::identifier("a")])]
                ),
                SyntaxNode::composite(
                    "block",
                    vec![
                        SyntaxNode::identifier("f"),
                        SyntaxNode::composite("spread", vec![SyntaxNode::identifier("rest")]),
                    ]
                ),
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        let tree = parse_str("; header\n(+ 1 2) ; trailing").unwrap();
        assert_eq!(tree.children().len(), 1);
        assert_eq!(tree.children()[0].children().len(), 3);
    }

    #[test]
    fn test_unmatched_paren() {
        let err = parse_str("(a b").unwrap_err();
        assert_eq!(err.path, "test.sutra");
        assert_eq!(err.span.offset(), 4);
        assert!(err.help.is_some());
    }

    #[test]
    fn test_stray_closing_paren() {
        assert!(parse_str("a)").is_err());
    }
}
