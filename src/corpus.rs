//! Corpus building: walk an input tree, encode every parseable script, and
//! write one sequence-numbered document per script.
//!
//! The walk follows this flow:
//! 1. List the immediate entries of the input root, sorted by name
//! 2. Walk each entry's subtree, entry first, siblings sorted by name
//! 3. Give every visited entry the next sequence number, directories included
//! 4. Parse files with the target extension; skip unparsable ones
//! 5. Create `<sequence>.txt` exclusively and stream the encoding into it
//!
//! Counting a vocabulary walks the same way, with step 5 replaced by adding
//! the tree's tokens to a running count.

use std::fs::{self, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::encoding::{encode, for_each_token, EncodingConfig};
use crate::errors::{BuildError, ParseError};
use crate::syntax::{SourceParser, SutraParser, SyntaxNode};
use crate::vocab::TokenCounts;

/// Extension of Sutra scripts, without the dot.
pub const DEFAULT_EXTENSION: &str = "sutra";

/// Digits in an output document name.
pub const DEFAULT_SEQUENCE_WIDTH: usize = 8;

// ============================================================================
// OPTIONS AND RECORDS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub encoding: EncodingConfig,
    /// Files whose extension matches this (case-insensitively) are parsed.
    pub extension: String,
    pub sequence_width: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            encoding: EncodingConfig::default(),
            extension: DEFAULT_EXTENSION.to_string(),
            sequence_width: DEFAULT_SEQUENCE_WIDTH,
        }
    }
}

impl BuildOptions {
    pub fn new(encoding: EncodingConfig) -> Self {
        Self {
            encoding,
            ..Self::default()
        }
    }

    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into().trim_start_matches('.').to_string();
        self
    }

    pub fn sequence_width(mut self, width: usize) -> Self {
        self.sequence_width = width;
        self
    }
}

/// What happened to one visited file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    Written,
    /// Tokens added to a vocabulary count; no document is written.
    Counted,
    SkippedUnparsable,
    SkippedNonMatchingExtension,
}

/// The record of one visited file. Directories get no record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusFile {
    pub sequence: u64,
    pub source_path: PathBuf,
    pub status: FileStatus,
    pub output_path: Option<PathBuf>,
}

/// Outcome of a successful build, in walk order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    pub encoding: EncodingConfig,
    /// Every filesystem entry visited, directories included.
    pub entries_visited: u64,
    pub written: usize,
    pub counted: usize,
    pub skipped_unparsable: usize,
    pub skipped_extension: usize,
    pub files: Vec<CorpusFile>,
}

impl BuildReport {
    pub fn new(encoding: EncodingConfig) -> Self {
        Self {
            encoding,
            ..Self::default()
        }
    }

    /// Append the record of one visited file and update the counters.
    pub fn push(&mut self, file: CorpusFile) {
        let counter = match file.status {
            FileStatus::Written => &mut self.written,
            FileStatus::Counted => &mut self.counted,
            FileStatus::SkippedUnparsable => &mut self.skipped_unparsable,
            FileStatus::SkippedNonMatchingExtension => &mut self.skipped_extension,
        };
        *counter += 1;
        self.files.push(file);
    }

    /// Output documents written, in sequence order.
    pub fn documents(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().filter_map(|f| f.output_path.as_deref())
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Drives a `SourceParser` over a directory tree.
///
/// The builder holds no per-run state: each call to [`CorpusBuilder::build`]
/// numbers entries from one, so separate builds never share a counter.
#[derive(Debug, Clone)]
pub struct CorpusBuilder<P> {
    parser: P,
    options: BuildOptions,
}

impl CorpusBuilder<SutraParser> {
    /// A builder for `.sutra` scripts.
    pub fn sutra(options: BuildOptions) -> Self {
        Self::new(SutraParser, options)
    }
}

impl<P: SourceParser> CorpusBuilder<P> {
    pub fn new(parser: P, options: BuildOptions) -> Self {
        Self { parser, options }
    }

    /// Encode every parseable script under `input_root` into `output_dir`.
    ///
    /// Unparsable files are skipped. Walk, read and write failures, an
    /// existing output document, and sequence overflow abort the build.
    pub fn build(&self, input_root: &Path, output_dir: &Path) -> Result<BuildReport, BuildError> {
        prepare_output_dir(output_dir)?;
        info!(
            input = %input_root.display(),
            output = %output_dir.display(),
            mode = ?self.options.encoding.mode,
            literals = self.options.encoding.include_literals,
            "building corpus"
        );

        let writer = DocumentWriter {
            output_dir,
            options: &self.options,
        };
        let (report, _) = self.run(input_root, writer)?;
        info!(
            entries = report.entries_visited,
            written = report.written,
            unparsable = report.skipped_unparsable,
            other = report.skipped_extension,
            "corpus complete"
        );
        Ok(report)
    }

    /// Count the tokens every parseable script under `input_root` would
    /// contribute to a flat corpus built with the same options.
    ///
    /// Tokens are whitespace-separated, as a reader of a flat document sees
    /// them. Nothing is written; failures abort as in [`CorpusBuilder::build`].
    pub fn count_tokens(
        &self,
        input_root: &Path,
    ) -> Result<(TokenCounts, BuildReport), BuildError> {
        info!(input = %input_root.display(), "counting tokens");
        let counter = TokenCounter {
            encoding: &self.options.encoding,
            counts: TokenCounts::new(),
        };
        let (report, counter) = self.run(input_root, counter)?;
        info!(
            entries = report.entries_visited,
            counted = report.counted,
            unparsable = report.skipped_unparsable,
            distinct = counter.counts.distinct(),
            "token count complete"
        );
        Ok((counter.counts, report))
    }

    fn run<S: TreeSink>(
        &self,
        input_root: &Path,
        sink: S,
    ) -> Result<(BuildReport, S), BuildError> {
        let mut run = BuildRun {
            builder: self,
            sink,
            sequence: 0,
            report: BuildReport::new(self.options.encoding),
        };
        for project in sorted_entries(input_root)? {
            run.walk_project(&project)?;
        }
        Ok((run.report, run.sink))
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.options.extension))
    }

    fn parse_file(&self, path: &Path) -> Result<Result<SyntaxNode, ParseError>, BuildError> {
        let bytes = fs::read(path).map_err(|e| BuildError::io("read", path, e))?;
        Ok(match String::from_utf8(bytes) {
            Ok(source) => self.parser.parse(path, &source),
            Err(e) => Err(ParseError::invalid_utf8(path, e)),
        })
    }
}

/// Build a Sutra corpus with the bundled parser.
pub fn build(
    input_root: &Path,
    output_dir: &Path,
    options: BuildOptions,
) -> Result<BuildReport, BuildError> {
    CorpusBuilder::sutra(options).build(input_root, output_dir)
}

/// Name of the document for `sequence`, zero-padded to `width` digits.
pub fn document_name(sequence: u64, width: usize) -> Result<String, BuildError> {
    let fits = u32::try_from(width)
        .ok()
        .and_then(|w| 10u64.checked_pow(w))
        .map_or(true, |limit| sequence < limit);
    if !fits {
        return Err(BuildError::SequenceOverflow { sequence, width });
    }
    Ok(format!("{:0width$}.txt", sequence, width = width))
}

// ============================================================================
// INTERNAL - per-tree output
// ============================================================================

/// Receives each parsed tree in walk order.
trait TreeSink {
    /// Status recorded for a file whose tree was accepted.
    const ACCEPTED: FileStatus;

    fn accept(
        &mut self,
        sequence: u64,
        tree: &SyntaxNode,
    ) -> Result<Option<PathBuf>, BuildError>;
}

struct DocumentWriter<'a> {
    output_dir: &'a Path,
    options: &'a BuildOptions,
}

impl TreeSink for DocumentWriter<'_> {
    const ACCEPTED: FileStatus = FileStatus::Written;

    fn accept(
        &mut self,
        sequence: u64,
        tree: &SyntaxNode,
    ) -> Result<Option<PathBuf>, BuildError> {
        let name = document_name(sequence, self.options.sequence_width)?;
        let output_path = self.output_dir.join(name);
        let file = create_document(&output_path, sequence)?;
        write_document(BufWriter::new(file), tree, &self.options.encoding, &output_path)?;
        Ok(Some(output_path))
    }
}

struct TokenCounter<'a> {
    encoding: &'a EncodingConfig,
    counts: TokenCounts,
}

impl TreeSink for TokenCounter<'_> {
    const ACCEPTED: FileStatus = FileStatus::Counted;

    fn accept(
        &mut self,
        _sequence: u64,
        tree: &SyntaxNode,
    ) -> Result<Option<PathBuf>, BuildError> {
        let counts = &mut self.counts;
        for_each_token::<BuildError>(tree, self.encoding, &mut |token| {
            token.split_whitespace().for_each(|piece| counts.add(piece));
            Ok(())
        })?;
        Ok(None)
    }
}

/// Encode `tree` through `writer`, flush it, and close it.
fn write_document<W: Write>(
    mut writer: W,
    tree: &SyntaxNode,
    encoding: &EncodingConfig,
    path: &Path,
) -> Result<(), BuildError> {
    encode(tree, encoding, &mut writer).map_err(|e| BuildError::io("write", path, e))?;
    writer.flush().map_err(|e| BuildError::io("flush", path, e))
}

// ============================================================================
// INTERNAL - a single run
// ============================================================================

struct BuildRun<'a, P, S> {
    builder: &'a CorpusBuilder<P>,
    sink: S,
    sequence: u64,
    report: BuildReport,
}

impl<P: SourceParser, S: TreeSink> BuildRun<'_, P, S> {
    fn walk_project(&mut self, project: &Path) -> Result<(), BuildError> {
        for entry in WalkDir::new(project).sort_by_file_name() {
            self.sequence += 1;
            self.report.entries_visited += 1;
            let entry = entry?;

            // A symlinked project root is descended into, but reports the
            // link's own file type.
            let is_dir = entry.file_type().is_dir()
                || (entry.path_is_symlink() && entry.path().is_dir());
            if is_dir {
                debug!(sequence = self.sequence, path = %entry.path().display(), "directory");
                continue;
            }
            self.visit_file(entry.path())?;
        }
        Ok(())
    }

    fn visit_file(&mut self, path: &Path) -> Result<(), BuildError> {
        let sequence = self.sequence;

        if !self.builder.matches_extension(path) {
            debug!(sequence, path = %path.display(), "skipping: extension");
            self.record(sequence, path, FileStatus::SkippedNonMatchingExtension, None);
            return Ok(());
        }

        let tree = match self.builder.parse_file(path)? {
            Ok(tree) => tree,
            Err(err) => {
                warn!(sequence, path = %path.display(), error = %err.message, "skipping: unparsable");
                self.record(sequence, path, FileStatus::SkippedUnparsable, None);
                return Ok(());
            }
        };

        let output_path = self.sink.accept(sequence, &tree)?;
        debug!(sequence, path = %path.display(), status = ?S::ACCEPTED, "accepted");
        self.record(sequence, path, S::ACCEPTED, output_path);
        Ok(())
    }

    fn record(&mut self, sequence: u64, path: &Path, status: FileStatus, output: Option<PathBuf>) {
        self.report.push(CorpusFile {
            sequence,
            source_path: path.to_path_buf(),
            status,
            output_path: output,
        });
    }
}

// ============================================================================
// INTERNAL - filesystem helpers
// ============================================================================

fn prepare_output_dir(output_dir: &Path) -> Result<(), BuildError> {
    if output_dir.exists() {
        if !output_dir.is_dir() {
            return Err(BuildError::InvalidOutputDir {
                path: output_dir.to_path_buf(),
            });
        }
        return Ok(());
    }
    fs::create_dir_all(output_dir).map_err(|e| BuildError::io("create", output_dir, e))
}

fn sorted_entries(root: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let mut entries = fs::read_dir(root)
        .map_err(|e| BuildError::io("read directory", root, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, io::Error>>()
        .map_err(|e| BuildError::io("read directory", root, e))?;
    entries.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(entries)
}

fn create_document(path: &Path, sequence: u64) -> Result<fs::File, BuildError> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| match e.kind() {
            io::ErrorKind::AlreadyExists => BuildError::OutputCollision {
                sequence,
                path: path.to_path_buf(),
            },
            _ => BuildError::io("create", path, e),
        })
}
