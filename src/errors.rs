//! Error types for the corpus miner.
//!
//! Two families exist. `ParseError` is per-file and recoverable: the corpus
//! builder logs it and moves on. `BuildError` is fatal and aborts the run.
//! Both are `miette` diagnostics so the CLI can render them with context.

use std::io;
use std::path::{Path, PathBuf};
use std::string::FromUtf8Error;
use std::sync::Arc;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

// ============================================================================
// PARSE ERRORS - recovered per file
// ============================================================================

/// A source file could not be turned into a syntax tree.
#[derive(Error, Diagnostic, Debug)]
#[error("Parse error in {path}: {message}")]
#[diagnostic(code(sutra_corpus::parse))]
pub struct ParseError {
    pub path: String,
    pub message: String,
    #[source_code]
    pub src: Arc<NamedSource<String>>,
    #[label("here")]
    pub span: SourceSpan,
    #[help]
    pub help: Option<String>,
}

impl ParseError {
    /// Creates a parse error pointing at `span` (byte offset, length) in `source`.
    pub fn new(
        path: &Path,
        source: &str,
        message: impl Into<String>,
        span: impl Into<SourceSpan>,
    ) -> Self {
        let name = path.display().to_string();
        Self {
            src: Arc::new(NamedSource::new(name.clone(), source.to_string())),
            path: name,
            message: message.into(),
            span: span.into(),
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// The file's bytes are not UTF-8 text.
    pub fn invalid_utf8(path: &Path, error: FromUtf8Error) -> Self {
        let valid_up_to = error.utf8_error().valid_up_to();
        let lossy = String::from_utf8_lossy(error.as_bytes()).into_owned();
        Self::new(path, &lossy, "file is not valid UTF-8", (valid_up_to, 1))
    }
}

// ============================================================================
// BUILD ERRORS - fatal to the whole run
// ============================================================================

/// A condition that aborts a corpus build.
#[derive(Error, Diagnostic, Debug)]
pub enum BuildError {
    #[error("Output path '{}' exists and is not a directory", .path.display())]
    #[diagnostic(
        code(sutra_corpus::usage),
        help("pass an empty or nonexistent directory to --out")
    )]
    InvalidOutputDir { path: PathBuf },

    #[error("I/O error while trying to {action} '{}'", .path.display())]
    #[diagnostic(code(sutra_corpus::io))]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to walk input tree")]
    #[diagnostic(code(sutra_corpus::walk))]
    Walk {
        #[from]
        source: walkdir::Error,
    },

    #[error("Output document '{}' already exists (sequence {sequence})", .path.display())]
    #[diagnostic(
        code(sutra_corpus::collision),
        help("documents are never overwritten; write into an empty output directory")
    )]
    OutputCollision { sequence: u64, path: PathBuf },

    #[error("Sequence number {sequence} does not fit in {width} digits")]
    #[diagnostic(code(sutra_corpus::sequence_overflow))]
    SequenceOverflow { sequence: u64, width: usize },
}

impl BuildError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        BuildError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}
