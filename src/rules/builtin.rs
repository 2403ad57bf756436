//! The three rules that neutralize `jdk.nashorn.internal.ir.debug.ObjectSizeCalculator`.
//!
//! Order matters: the import goes first, then the `long` declarations that
//! call the calculator, then the prints that read those declarations.

use crate::rules::errors::RuleError;
use crate::rules::rule::{Rule, RuleSet};

/// The import that no longer resolves on Java 9+.
pub const UNAVAILABLE_IMPORT: &str = "import jdk.nashorn.internal.ir.debug.ObjectSizeCalculator;";

/// Trailing note appended to every disabled statement.
pub const JAVA9_NOTE: &str = "// Java 9+ 不可用";

/// Statement printed in place of a disabled size report.
pub const FALLBACK_PRINT: &str = r#"System.out.println("Index size: (需要 Java 8)");"#;

// Only the two variables that hold calculator results are disabled.
const DECLARATION_PATTERN: &str = r"(?m)^(?P<indent>[ \t]*)long (?P<name>piSize|sz) = ObjectSizeCalculator\.getObjectSize\((?P<args>[^)\n]+)\);";

// Matches `System.out.println("<label>size:" + piSize ...)` and the `sz` form.
const PRINT_PATTERN: &str = r#"(?m)^(?P<indent>[ \t]*)(?P<stmt>System\.out\.println\("[^"\n]*size:" \+ (?:piSize|sz)\b[^;\n]*\);)"#;

pub fn import_rule() -> Result<Rule, RuleError> {
    Rule::literal(
        "disable-import",
        "comment out the ObjectSizeCalculator import",
        UNAVAILABLE_IMPORT,
        format!("// {UNAVAILABLE_IMPORT} {JAVA9_NOTE}"),
    )
}

pub fn declaration_rule() -> Result<Rule, RuleError> {
    Rule::regex(
        "disable-declaration",
        "comment out `long piSize|sz = ObjectSizeCalculator.getObjectSize(..);`",
        DECLARATION_PATTERN,
        format!(
            "${{indent}}// long ${{name}} = ObjectSizeCalculator.getObjectSize(${{args}}); {JAVA9_NOTE}"
        ),
    )
}

pub fn print_rule() -> Result<Rule, RuleError> {
    Rule::regex(
        "disable-size-print",
        "comment out size prints of piSize/sz and print a fallback line",
        PRINT_PATTERN,
        format!("${{indent}}// ${{stmt}} {JAVA9_NOTE}\n${{indent}}{FALLBACK_PRINT}"),
    )
}

/// Build the fixed rule set, in application order.
pub fn builtin_rules() -> Result<RuleSet, RuleError> {
    Ok(RuleSet::new(vec![
        import_rule()?,
        declaration_rule()?,
        print_rule()?,
    ]))
}
