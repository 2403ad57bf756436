use crate::rules::errors::RuleError;
use crate::rules::pattern::Pattern;
use regex::Regex;
use std::borrow::Cow;
use std::fmt;

/// Line break convention of a text, used when a replacement inserts lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    /// `CrLf` if the text contains any `\r\n`, otherwise `Lf`.
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// One transformation: a pattern and the template that replaces each match.
///
/// For regex patterns the template uses `regex` expansion syntax
/// (`${name}`, `$1`). For literal patterns it is inserted verbatim. A `\n`
/// in the template is written using the line ending of the patched text.
#[derive(Debug, Clone)]
pub struct Rule {
    pub id: &'static str,
    pub description: &'static str,
    pub pattern: Pattern,
    pub replacement: String,
}

/// Output of applying one rule to a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutput<'a> {
    pub text: Cow<'a, str>,
    pub count: usize,
}

impl Rule {
    /// Rule matching an exact line-leading literal.
    pub fn literal(
        id: &'static str,
        description: &'static str,
        literal: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Result<Self, RuleError> {
        let literal = literal.into();
        if literal.is_empty() {
            return Err(RuleError::EmptyLiteral { id });
        }
        Ok(Self {
            id,
            description,
            pattern: Pattern::Literal(literal),
            replacement: replacement.into(),
        })
    }

    /// Rule matching a regex with capture groups.
    pub fn regex(
        id: &'static str,
        description: &'static str,
        pattern: &str,
        replacement: impl Into<String>,
    ) -> Result<Self, RuleError> {
        let re = Regex::new(pattern).map_err(|source| RuleError::InvalidPattern { id, source })?;
        Ok(Self {
            id,
            description,
            pattern: Pattern::Regex(re),
            replacement: replacement.into(),
        })
    }

    /// Replace every match in `source`.
    ///
    /// Borrows `source` unchanged when nothing matches.
    pub fn apply<'a>(&self, source: &'a str, line_ending: LineEnding) -> RuleOutput<'a> {
        if !self.pattern.is_match(source) {
            return RuleOutput {
                text: Cow::Borrowed(source),
                count: 0,
            };
        }

        let template: Cow<'_, str> = match line_ending {
            LineEnding::CrLf if self.replacement.contains('\n') => {
                Cow::Owned(self.replacement.replace('\n', LineEnding::CrLf.as_str()))
            }
            _ => Cow::Borrowed(self.replacement.as_str()),
        };

        let (text, count) = self.pattern.rewrite(source, |caps, out| match caps {
            Some(caps) => caps.expand(&template, out),
            None => out.push_str(&template),
        });

        RuleOutput {
            text: Cow::Owned(text),
            count,
        }
    }

    /// Check that `sample` is rewritten exactly once: the rule must match it,
    /// and its own output must not match again.
    pub fn check_idempotent(&self, sample: &str) -> Result<(), RuleError> {
        let first = self.apply(sample, LineEnding::detect(sample));
        if first.count == 0 {
            return Err(RuleError::SampleNotMatched { id: self.id });
        }
        if self.pattern.is_match(&first.text) {
            return Err(RuleError::NotIdempotent { id: self.id });
        }
        Ok(())
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.description)
    }
}

/// Ordered rule sequence. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
