use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuleError {
    #[error("rule '{id}' has an invalid pattern: {source}")]
    InvalidPattern {
        id: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("rule '{id}' has an empty literal pattern")]
    EmptyLiteral { id: &'static str },

    #[error("rule '{id}' does not match its own sample text")]
    SampleNotMatched { id: &'static str },

    #[error("rule '{id}' is not idempotent: its replacement matches its own pattern")]
    NotIdempotent { id: &'static str },
}
