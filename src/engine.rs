//! Patch engine: applies a [`RuleSet`] to text and to files.
//!
//! [`patch_text`] is pure. [`patch_file`] adds the read / compare / write
//! steps through the [`FileReader`] and [`FileWriter`] collaborators, and
//! [`patch_all`] drives a whole [`TargetList`] without stopping on failures.

use crate::config::TargetList;
use crate::io::{FileReader, FileWriter, RecordingWriter};
use crate::report::{Reporter, Summary};
use crate::rules::{LineEnding, RuleSet};
use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// How many spans one rule replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleMatches {
    pub rule: &'static str,
    pub count: usize,
}

/// Output of [`patch_text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchedText {
    pub text: String,
    /// One entry per rule, in rule order
    pub counts: Vec<RuleMatches>,
}

impl PatchedText {
    pub fn total_matches(&self) -> usize {
        self.counts.iter().map(|m| m.count).sum()
    }
}

/// Outcome of patching one file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "PatchResult should be reported"]
pub enum PatchResult {
    /// The file does not exist
    NotFound,
    /// Rules produced identical text; nothing written
    Unchanged,
    /// New text was written
    Patched { counts: Vec<RuleMatches> },
}

impl PatchResult {
    /// Per-rule counts; empty unless the file was patched.
    pub fn counts(&self) -> &[RuleMatches] {
        match self {
            PatchResult::Patched { counts } => counts,
            PatchResult::NotFound | PatchResult::Unchanged => &[],
        }
    }
}

impl fmt::Display for PatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchResult::NotFound => write!(f, "not found"),
            PatchResult::Unchanged => write!(f, "unchanged"),
            PatchResult::Patched { counts } => {
                write!(f, "patched")?;
                let fired: Vec<String> = counts
                    .iter()
                    .filter(|m| m.count > 0)
                    .map(|m| format!("{} x{}", m.rule, m.count))
                    .collect();
                if !fired.is_empty() {
                    write!(f, " ({})", fired.join(", "))?;
                }
                Ok(())
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum PatchError {
    #[error("{} is not valid UTF-8: {source}", path.display())]
    Encoding {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PatchError {
    pub fn path(&self) -> &Path {
        match self {
            PatchError::Encoding { path, .. }
            | PatchError::Read { path, .. }
            | PatchError::Write { path, .. } => path,
        }
    }
}

/// Apply every rule in order; rule N sees the output of rule N-1.
pub fn patch_text(original: &str, rules: &RuleSet) -> PatchedText {
    let line_ending = LineEnding::detect(original);
    let mut text = Cow::Borrowed(original);
    let mut counts = Vec::with_capacity(rules.len());

    for rule in rules {
        let output = rule.apply(&text, line_ending);
        counts.push(RuleMatches {
            rule: rule.id,
            count: output.count,
        });
        let next = match output.text {
            Cow::Owned(next) => Some(next),
            Cow::Borrowed(_) => None,
        };
        if let Some(next) = next {
            text = Cow::Owned(next);
        }
    }

    PatchedText {
        text: text.into_owned(),
        counts,
    }
}

/// Patch one file. Writes only when the text actually changed.
pub fn patch_file<R, W>(
    path: &Path,
    rules: &RuleSet,
    reader: &R,
    writer: &W,
) -> Result<PatchResult, PatchError>
where
    R: FileReader + ?Sized,
    W: FileWriter + ?Sized,
{
    let Some(original) = reader.read(path)? else {
        return Ok(PatchResult::NotFound);
    };

    let patched = patch_text(&original, rules);
    if patched.text == original {
        return Ok(PatchResult::Unchanged);
    }

    writer.write(path, &patched.text)?;
    Ok(PatchResult::Patched {
        counts: patched.counts,
    })
}

/// Patch every target in order, reporting each outcome.
///
/// Failures are reported and counted; the remaining targets are still
/// processed.
pub fn patch_all<R, W>(
    targets: &TargetList,
    rules: &RuleSet,
    reader: &R,
    writer: &W,
    reporter: &mut dyn Reporter,
) -> Summary
where
    R: FileReader + ?Sized,
    W: FileWriter + ?Sized,
{
    let mut summary = Summary::default();

    for path in targets.iter() {
        let outcome = patch_file(path, rules, reader, writer);
        summary.record(&outcome);
        reporter.report(path, &outcome);
    }

    reporter.finish(&summary);
    summary
}

/// Same traversal as [`patch_all`] but nothing is written.
///
/// `Patched` in the returned summary means "would be patched".
pub fn check_all<R>(
    targets: &TargetList,
    rules: &RuleSet,
    reader: &R,
    reporter: &mut dyn Reporter,
) -> Summary
where
    R: FileReader + ?Sized,
{
    let discard = RecordingWriter::discard();
    patch_all(targets, rules, reader, &discard, reporter)
}
