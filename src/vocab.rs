//! Token vocabularies: how often each corpus token occurs.
//!
//! A vocabulary file has one `count<TAB>token` line per token, most frequent
//! first; tokens with equal counts are ordered bytewise so the file is
//! reproducible.

use std::collections::HashMap;
use std::io::{self, Write};

/// Tokens seen fewer times than this are left out of a vocabulary.
pub const DEFAULT_MIN_COUNT: u64 = 2;

/// Occurrence counts for every token seen so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenCounts {
    counts: HashMap<String, u64>,
}

impl TokenCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, token: &str) {
        match self.counts.get_mut(token) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(token.to_string(), 1);
            }
        }
    }

    pub fn get(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Number of different tokens seen.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Total occurrences over all tokens.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// The tokens seen at least `min_count` times, most frequent first.
    pub fn vocabulary(&self, min_count: u64) -> Vocabulary {
        let mut entries: Vec<VocabEntry> = self
            .counts
            .iter()
            .filter(|&(_, &count)| count >= min_count)
            .map(|(token, &count)| VocabEntry {
                count,
                token: token.clone(),
            })
            .collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.token.cmp(&b.token)));
        Vocabulary { entries }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabEntry {
    pub count: u64,
    pub token: String,
}

/// A frequency-sorted token list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    entries: Vec<VocabEntry>,
}

impl Vocabulary {
    pub fn entries(&self) -> &[VocabEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write one `count<TAB>token` line per entry.
    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        for entry in &self.entries {
            writeln!(out, "{}\t{}", entry.count, entry.token)?;
        }
        Ok(())
    }
}
