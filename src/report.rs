//! Reporting collaborators: per-file outcome lines, the run summary, and
//! unified diffs.

use crate::engine::{PatchError, PatchResult};
use colored::Colorize;
use similar::{ChangeTag, TextDiff};
use std::path::Path;

/// Receives one outcome per target, then a final call once all are done.
pub trait Reporter {
    fn report(&mut self, path: &Path, outcome: &Result<PatchResult, PatchError>);
    fn finish(&mut self, summary: &Summary);
}

/// Counts of each outcome across a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub patched: usize,
    pub unchanged: usize,
    pub not_found: usize,
    pub failed: usize,
}

impl Summary {
    pub fn record(&mut self, outcome: &Result<PatchResult, PatchError>) {
        match outcome {
            Ok(PatchResult::Patched { .. }) => self.patched += 1,
            Ok(PatchResult::Unchanged) => self.unchanged += 1,
            Ok(PatchResult::NotFound) => self.not_found += 1,
            Err(_) => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.patched + self.unchanged + self.not_found + self.failed
    }

    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// What the run is doing, which changes how outcomes are worded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Apply,
    DryRun,
    Status,
}

/// Colored console reporter.
#[derive(Debug)]
pub struct ConsoleReporter {
    mode: Mode,
}

impl ConsoleReporter {
    pub fn new(mode: Mode) -> Self {
        Self { mode }
    }

    fn patched_label(&self) -> &'static str {
        match self.mode {
            Mode::Apply => "patched",
            Mode::DryRun => "would patch",
            Mode::Status => "needs patch",
        }
    }

    fn unchanged_label(&self) -> &'static str {
        match self.mode {
            Mode::Apply | Mode::DryRun => "unchanged",
            Mode::Status => "already patched",
        }
    }
}

impl Reporter for ConsoleReporter {
    fn report(&mut self, path: &Path, outcome: &Result<PatchResult, PatchError>) {
        match outcome {
            Ok(PatchResult::Patched { counts }) => {
                println!(
                    "{} {}: {}",
                    "✓".green(),
                    path.display(),
                    self.patched_label()
                );
                for m in counts.iter().filter(|m| m.count > 0) {
                    println!("    {} x{}", m.rule.dimmed(), m.count);
                }
            }
            Ok(PatchResult::Unchanged) => {
                println!(
                    "{} {}: {}",
                    "⊙".yellow(),
                    path.display(),
                    self.unchanged_label()
                );
            }
            Ok(PatchResult::NotFound) => {
                println!("{} {}: not found", "⊘".cyan(), path.display());
            }
            Err(e) => {
                eprintln!("{} {}: failed - {}", "✗".red(), path.display(), e);
            }
        }
    }

    fn finish(&mut self, summary: &Summary) {
        println!();
        println!("{}", "Summary:".bold());
        println!(
            "  {} {}",
            format!("{}", summary.patched).green(),
            self.patched_label()
        );
        println!(
            "  {} {}",
            format!("{}", summary.unchanged).yellow(),
            self.unchanged_label()
        );
        println!("  {} not found", format!("{}", summary.not_found).cyan());
        println!("  {} failed", format!("{}", summary.failed).red());
        println!();
        println!("All {} files processed.", summary.total());
    }
}

/// Render a unified diff between the original and patched text.
pub fn render_diff(file: &Path, original: &str, modified: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("--- {} (original)\n", file.display()));
    out.push_str(&format!("+++ {} (patched)\n", file.display()));

    let diff = TextDiff::from_lines(original, modified);
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => '-',
            ChangeTag::Insert => '+',
            ChangeTag::Equal => continue,
        };
        out.push(sign);
        out.push_str(change.value());
        if change.missing_newline() {
            out.push('\n');
        }
    }
    out
}

/// Print [`render_diff`] output with deletions red and insertions green.
pub fn display_diff(file: &Path, original: &str, modified: &str) {
    println!();
    for line in render_diff(file, original, modified).lines() {
        if line.starts_with("---") || line.starts_with("+++") {
            println!("{}", line.dimmed());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else {
            println!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RuleMatches;
    use std::path::PathBuf;

    #[test]
    fn summary_counts_each_outcome() {
        let mut summary = Summary::default();
        summary.record(&Ok(PatchResult::Patched {
            counts: vec![RuleMatches {
                rule: "disable-import",
                count: 1,
            }],
        }));
        summary.record(&Ok(PatchResult::Unchanged));
        summary.record(&Ok(PatchResult::NotFound));
        summary.record(&Err(PatchError::Write {
            path: PathBuf::from("A.java"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        }));

        assert_eq!(
            summary,
            Summary {
                patched: 1,
                unchanged: 1,
                not_found: 1,
                failed: 1,
            }
        );
        assert_eq!(summary.total(), 4);
        assert!(summary.has_failures());
    }

    #[test]
    fn render_diff_shows_only_changed_lines() {
        let diff = render_diff(
            Path::new("A.java"),
            "keep\nimport x;\nkeep\n",
            "keep\n// import x;\nkeep\n",
        );
        assert_eq!(
            diff,
            "--- A.java (original)\n+++ A.java (patched)\n-import x;\n+// import x;\n"
        );
    }
}
