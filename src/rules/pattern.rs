use regex::{Captures, Regex};
use std::fmt;

/// A match located by a [`Pattern`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    /// Byte range of the entire match
    pub byte_start: usize,
    pub byte_end: usize,
    /// The matched text
    pub text: String,
}

/// What a rule looks for.
///
/// Literal patterns only match as the first non-blank text of a line, so a
/// literal that already sits behind a `//` marker is never matched again.
/// Regex patterns carry their own anchoring.
#[derive(Clone)]
pub enum Pattern {
    /// Exact text, matched at line start (after optional spaces or tabs)
    Literal(String),
    /// Compiled regex with named or positional capture groups
    Regex(Regex),
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Pattern::Regex(re) => f.debug_tuple("Regex").field(&re.as_str()).finish(),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Literal(text) => write!(f, "literal `{text}`"),
            Pattern::Regex(re) => write!(f, "regex `{}`", re.as_str()),
        }
    }
}

impl Pattern {
    /// Find every non-overlapping match in `source`, in order.
    pub fn find_all(&self, source: &str) -> Vec<PatternMatch> {
        match self {
            Pattern::Literal(literal) => source
                .match_indices(literal.as_str())
                .filter(|(offset, _)| at_line_start(source, *offset))
                .map(|(offset, text)| PatternMatch {
                    byte_start: offset,
                    byte_end: offset + text.len(),
                    text: text.to_string(),
                })
                .collect(),
            Pattern::Regex(re) => re
                .find_iter(source)
                .map(|m| PatternMatch {
                    byte_start: m.start(),
                    byte_end: m.end(),
                    text: m.as_str().to_string(),
                })
                .collect(),
        }
    }

    /// Whether the pattern matches anywhere in `source`.
    pub fn is_match(&self, source: &str) -> bool {
        match self {
            Pattern::Literal(_) => !self.find_all(source).is_empty(),
            Pattern::Regex(re) => re.is_match(source),
        }
    }

    /// Rewrite every match, returning the new text and the match count.
    ///
    /// `render` produces the replacement for one match. For regex patterns it
    /// receives the captures; literal patterns pass `None`.
    pub(crate) fn rewrite<F>(&self, source: &str, mut render: F) -> (String, usize)
    where
        F: FnMut(Option<&Captures<'_>>, &mut String),
    {
        let mut out = String::with_capacity(source.len());
        let mut last = 0;
        let mut count = 0;

        match self {
            Pattern::Literal(_) => {
                for m in self.find_all(source) {
                    out.push_str(&source[last..m.byte_start]);
                    render(None, &mut out);
                    last = m.byte_end;
                    count += 1;
                }
            }
            Pattern::Regex(re) => {
                for caps in re.captures_iter(source) {
                    let whole = caps.get(0).expect("group 0 is always present");
                    out.push_str(&source[last..whole.start()]);
                    render(Some(&caps), &mut out);
                    last = whole.end();
                    count += 1;
                }
            }
        }

        out.push_str(&source[last..]);
        (out, count)
    }
}

/// True when only spaces or tabs sit between the previous line break (or the
/// start of the text) and `offset`.
fn at_line_start(source: &str, offset: usize) -> bool {
    source[..offset]
        .bytes()
        .rev()
        .take_while(|b| *b != b'\n')
        .all(|b| b == b' ' || b == b'\t')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_matches_at_line_start_only() {
        let pattern = Pattern::Literal("import a.B;".to_string());
        let source = "import a.B;\n  import a.B;\n// import a.B;\nx import a.B;\n";

        let matches = pattern.find_all(source);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].byte_start, 0);
        assert_eq!(matches[1].byte_start, 14);
        assert_eq!(matches[1].text, "import a.B;");
    }

    #[test]
    fn literal_after_crlf_is_at_line_start() {
        let pattern = Pattern::Literal("import a.B;".to_string());
        assert!(pattern.is_match("package p;\r\nimport a.B;\r\n"));
    }

    #[test]
    fn regex_find_all_reports_spans() {
        let pattern = Pattern::Regex(Regex::new(r"b+").unwrap());
        let matches = pattern.find_all("abbcb");
        assert_eq!(
            matches,
            vec![
                PatternMatch {
                    byte_start: 1,
                    byte_end: 3,
                    text: "bb".to_string()
                },
                PatternMatch {
                    byte_start: 4,
                    byte_end: 5,
                    text: "b".to_string()
                },
            ]
        );
    }

    #[test]
    fn rewrite_keeps_text_between_matches() {
        let pattern = Pattern::Regex(Regex::new(r"(?P<d>\d)").unwrap());
        let (out, count) = pattern.rewrite("a1b2c", |caps, out| {
            let caps = caps.unwrap();
            out.push('<');
            out.push_str(&caps["d"]);
            out.push('>');
        });
        assert_eq!(out, "a<1>b<2>c");
        assert_eq!(count, 2);
    }

    #[test]
    fn rewrite_without_match_is_identity() {
        let pattern = Pattern::Literal("missing".to_string());
        let (out, count) = pattern.rewrite("left\r\nalone\n", |_, out| out.push('!'));
        assert_eq!(out, "left\r\nalone\n");
        assert_eq!(count, 0);
    }
}
