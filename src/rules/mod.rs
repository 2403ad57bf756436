//! Fixed, ordered text rules that disable `ObjectSizeCalculator` usage.
//!
//! A rule is plain data: a [`Pattern`] plus a replacement template. The
//! engine walks a [`RuleSet`] in order, feeding each rule the output of the
//! previous one.

pub mod builtin;
pub mod errors;
pub mod pattern;
pub mod rule;

pub use builtin::{
    builtin_rules, declaration_rule, import_rule, print_rule, FALLBACK_PRINT, JAVA9_NOTE,
    UNAVAILABLE_IMPORT,
};
pub use errors::RuleError;
pub use pattern::{Pattern, PatternMatch};
pub use rule::{LineEnding, Rule, RuleOutput, RuleSet};
