//! Splitting of identifier-like tokens into lowercase subtokens.
//!
//! `setKind` becomes `set kind`, `ASTParser` becomes `ast parser`,
//! `player.health` becomes `player . health`. Underscores between words are
//! dropped; a leading underscore run is kept as its own subtoken.
//!
//! A token is split left to right:
//! 1. An optional leading run of underscores or lowercase letters
//! 2. Repeatedly: skip underscores, then take the next body subtoken
//! 3. If some suffix cannot be split, the token is returned whole

use once_cell::sync::Lazy;
use regex::Regex;

static LEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:_+|[a-z]+)").expect("leading subtoken pattern"));

static UPPER_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]+").expect("uppercase run pattern"));

/// Runs of one punctuation class; brackets of either side count as one class.
static SYMBOL_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(?:\.+|-+|:+|\*+|&+|\^+|["']+|/+|~+|[<>]+|[\[\]]+|[()]+)"#)
        .expect("symbol run pattern")
});

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+").expect("digit run pattern"));

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]?[a-z]+").expect("word pattern"));

/// Split one whitespace-free token into lowercase subtokens.
///
/// Returns the token unchanged as a single subtoken when it cannot be split
/// completely. An empty token has no subtokens.
pub fn subtokenize(token: &str) -> Vec<String> {
    if token.is_empty() {
        return Vec::new();
    }

    let mut subtokens = Vec::new();
    let mut rest = token;
    if let Some(m) = LEADING.find(rest) {
        subtokens.push(m.as_str().to_lowercase());
        rest = &rest[m.end()..];
    }

    while !rest.is_empty() {
        let body = rest.trim_start_matches('_');
        let Some(len) = body_subtoken(body) else {
            return vec![token.to_string()];
        };
        subtokens.push(body[..len].to_lowercase());
        rest = &body[len..];
    }
    subtokens
}

/// Subtokens of leaf text that may contain whitespace, such as a string
/// literal: each whitespace-separated piece is split on its own.
pub fn subtokenize_text(text: &str) -> Vec<String> {
    text.split_whitespace().flat_map(subtokenize).collect()
}

/// Byte length of the subtoken at the start of `body`, if any.
fn body_subtoken(body: &str) -> Option<usize> {
    if let Some(len) = acronym(body) {
        return Some(len);
    }
    [&*SYMBOL_RUN, &*DIGITS, &*WORD]
        .into_iter()
        .find_map(|re| re.find(body))
        .map(|m| m.end())
}

/// An uppercase run not followed by a lowercase letter. When it is, the last
/// capital starts the next word (`ASTParser` gives `AST`), and a lone capital
/// is left for the word rule.
fn acronym(body: &str) -> Option<usize> {
    let run = UPPER_RUN.find(body)?.end();
    let before_lowercase = body[run..].starts_with(|c: char| c.is_ascii_lowercase());
    match (before_lowercase, run) {
        (false, _) => Some(run),
        (true, 1) => None,
        (true, _) => Some(run - 1),
    }
}
