//! The corpus miner's command-line interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::io::{BufWriter, Write};
use std::path::Path;
use std::{fs, process};

use clap::Parser;
use miette::{IntoDiagnostic, WrapErr};
use tracing::Level;

use crate::cli::args::{Command, CorpusArgs, DumpArgs, VocabArgs};
use crate::corpus::{BuildOptions, CorpusBuilder};
use crate::encoding::{encode_to_string, EncodingConfig, EncodingMode};
use crate::syntax::{SourceParser, SutraParser};

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = CorpusArgs::parse();
    init_tracing(args.verbose, args.quiet);

    let result = match args.command {
        Command::FlatDump(dump) => dump_corpus(dump, EncodingMode::Flat),
        Command::TreeDump(dump) => dump_corpus(dump, EncodingMode::Tree),
        Command::Vocab(vocab) => build_vocab(vocab),
        Command::Show {
            file,
            tree,
            literals,
            subtokenize,
        } => {
            let mode = if tree {
                EncodingMode::Tree
            } else {
                EncodingMode::Flat
            };
            let config = EncodingConfig::new(mode, literals).subtokenized(subtokenize);
            show_file(&file, &config)
        }
    };

    if let Err(report) = result {
        eprintln!("{report:?}");
        process::exit(1);
    }
}

// ============================================================================
// COMMAND HANDLERS
// ============================================================================

fn dump_corpus(dump: DumpArgs, mode: EncodingMode) -> miette::Result<()> {
    let encoding = EncodingConfig::new(mode, dump.literals).subtokenized(dump.subtokenize);
    let options = BuildOptions::new(encoding).extension(dump.ext);
    let report = CorpusBuilder::sutra(options).build(&dump.input, &dump.out)?;

    if let Some(manifest) = &dump.manifest {
        let json = serde_json::to_string_pretty(&report).into_diagnostic()?;
        fs::write(manifest, json)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to write manifest '{}'", manifest.display()))?;
    }

    output::print_summary(&report, &dump.out).into_diagnostic()
}

fn build_vocab(args: VocabArgs) -> miette::Result<()> {
    let encoding = EncodingConfig::flat(args.literals).subtokenized(args.subtokenize);
    let options = BuildOptions::new(encoding).extension(args.ext);
    let (counts, report) = CorpusBuilder::sutra(options).count_tokens(&args.input)?;
    let vocabulary = counts.vocabulary(args.min_count);

    let file = fs::File::create(&args.out)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to create vocabulary '{}'", args.out.display()))?;
    let mut writer = BufWriter::new(file);
    vocabulary
        .write_to(&mut writer)
        .and_then(|()| writer.flush())
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to write vocabulary '{}'", args.out.display()))?;

    output::print_vocab_summary(&vocabulary, &counts, &report, &args.out).into_diagnostic()
}

fn show_file(file: &Path, config: &EncodingConfig) -> miette::Result<()> {
    let source = fs::read_to_string(file)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read '{}'", file.display()))?;
    let tree = SutraParser.parse(file, &source)?;
    output::print_encoding(&encode_to_string(&tree, config)).into_diagnostic()
}

// ============================================================================
// LOGGING
// ============================================================================

fn log_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    tracing_subscriber::fmt()
        .with_max_level(log_level(verbose, quiet))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins_over_default() {
        assert_eq!(log_level(0, true), Level::ERROR);
        assert_eq!(log_level(0, false), Level::INFO);
        assert_eq!(log_level(1, false), Level::DEBUG);
        assert_eq!(log_level(5, false), Level::TRACE);
    }
}
