//! Defines the command-line arguments and subcommands for the corpus miner.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::corpus::DEFAULT_EXTENSION;
use crate::vocab::DEFAULT_MIN_COUNT;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "sutra-corpus",
    version,
    about = "Dump syntax trees of Sutra scripts as token corpora."
)]
pub struct CorpusArgs {
    /// Log more detail to stderr (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Dump a preorder token sequence for every script.
    FlatDump(DumpArgs),
    /// Dump a parenthesized token tree for every script.
    TreeDump(DumpArgs),
    /// Count corpus tokens and write a frequency-sorted vocabulary.
    Vocab(VocabArgs),
    /// Print the encoding of a single script.
    Show {
        /// The path to the Sutra script file to encode.
        #[arg(required = true)]
        file: PathBuf,
        /// Print the token tree instead of the flat sequence.
        #[arg(long)]
        tree: bool,
        /// Include literal values as tokens.
        #[arg(long, default_value_t = true, action = ArgAction::Set)]
        literals: bool,
        /// Split tokens into lowercase subtokens.
        #[arg(long)]
        subtokenize: bool,
    },
}

/// Arguments shared by the dump subcommands.
#[derive(Debug, Args)]
pub struct DumpArgs {
    /// Directory whose entries are walked for scripts.
    #[arg(required = true)]
    pub input: PathBuf,

    /// Empty or nonexistent directory that receives the token documents.
    #[arg(short, long, required = true)]
    pub out: PathBuf,

    /// Include literal values as tokens.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub literals: bool,

    /// Extension of the files to parse.
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    pub ext: String,

    /// Split tokens into lowercase subtokens (`setKind` -> `set kind`).
    #[arg(long)]
    pub subtokenize: bool,

    /// Write the build report to this path as JSON.
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

/// Arguments for the vocab subcommand.
#[derive(Debug, Args)]
pub struct VocabArgs {
    /// Directory whose entries are walked for scripts.
    #[arg(required = true)]
    pub input: PathBuf,

    /// File that receives the `count<TAB>token` lines.
    #[arg(short, long, required = true)]
    pub out: PathBuf,

    /// Tokens occurring fewer times are dropped.
    #[arg(long, default_value_t = DEFAULT_MIN_COUNT)]
    pub min_count: u64,

    /// Count literal values as tokens.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub literals: bool,

    /// Count lowercase subtokens instead of whole tokens.
    #[arg(long)]
    pub subtokenize: bool,

    /// Extension of the files to parse.
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    pub ext: String,
}
