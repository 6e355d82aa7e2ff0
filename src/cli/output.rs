//! Handles all user-facing output for the CLI.
//!
//! Logging goes to stderr through `tracing`; this module owns what lands on
//! stdout: encodings printed by `show` and the end-of-run summaries.

use std::io::{self, Write};
use std::path::Path;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::corpus::BuildReport;
use crate::vocab::{TokenCounts, Vocabulary};

/// Prints the end-of-run summary for a corpus build.
pub fn print_summary(report: &BuildReport, output_dir: &Path) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    write_summary(&mut stdout, report, output_dir)
}

/// Prints the end-of-run summary for a vocabulary count.
pub fn print_vocab_summary(
    vocabulary: &Vocabulary,
    counts: &TokenCounts,
    report: &BuildReport,
    path: &Path,
) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    write_vocab_summary(&mut stdout, vocabulary, counts, report, path)
}

/// Prints an encoding followed by a newline.
pub fn print_encoding(encoded: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", encoded)
}

fn write_summary<W: WriteColor>(
    out: &mut W,
    report: &BuildReport,
    output_dir: &Path,
) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
    write!(out, "✓ Wrote {} documents", report.written)?;
    out.reset()?;
    writeln!(out, " to {}", output_dir.display())?;
    write_skipped(out, report)
}

fn write_vocab_summary<W: WriteColor>(
    out: &mut W,
    vocabulary: &Vocabulary,
    counts: &TokenCounts,
    report: &BuildReport,
    path: &Path,
) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
    write!(out, "✓ Wrote {} tokens", vocabulary.len())?;
    out.reset()?;
    writeln!(out, " to {}", path.display())?;
    writeln!(
        out,
        "  Distinct tokens:       {} ({} occurrences in {} files)",
        counts.distinct(),
        counts.total(),
        report.counted
    )?;
    write_skipped(out, report)
}

fn write_skipped<W: WriteColor>(out: &mut W, report: &BuildReport) -> io::Result<()> {
    if report.skipped_unparsable > 0 {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        writeln!(out, "  Skipped (unparsable): {}", report.skipped_unparsable)?;
        out.reset()?;
    }
    writeln!(out, "  Skipped (other files): {}", report.skipped_extension)?;
    writeln!(out, "  Entries visited:       {}", report.entries_visited)?;
    Ok(())
}
