//! Property tests for idempotency and locality of the built-in rules.

use objsize_shim::{builtin_rules, patch_text};
use proptest::prelude::*;

fn indent() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("    ".to_string()),
        Just("        ".to_string()),
        Just("\t\t".to_string()),
    ]
}

/// Lines the rules are written for, with random indentation.
fn target_line() -> impl Strategy<Value = String> {
    let body = prop_oneof![
        Just("import jdk.nashorn.internal.ir.debug.ObjectSizeCalculator;".to_string()),
        Just("long piSize = ObjectSizeCalculator.getObjectSize(root);".to_string()),
        Just("long sz = ObjectSizeCalculator.getObjectSize(chain);".to_string()),
        Just(r#"System.out.println("ALBTree size:" + piSize / 1024.0 / 1024.0 + "mb");"#.to_string()),
        Just(r#"System.out.println("ALBTree size:" + sz / 1024.0 / 1024.0 + "mb");"#.to_string()),
        Just(r#"System.out.println("vo size:" + voSize / queryLen + "kb");"#.to_string()),
        Just("sz += ObjectSizeCalculator.getObjectSize(vcChain);".to_string()),
        Just("// 统计索引大小".to_string()),
    ];
    (indent(), body).prop_map(|(indent, body)| format!("{indent}{body}"))
}

/// Arbitrary printable ASCII.
fn noise_line() -> impl Strategy<Value = String> {
    "[ -~]{0,60}"
}

fn source_text() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(prop_oneof![target_line(), noise_line()], 0..24),
        prop_oneof![Just("\n"), Just("\r\n")],
        any::<bool>(),
    )
        .prop_map(|(lines, eol, trailing)| {
            let mut text = lines.join(eol);
            if trailing {
                text.push_str(eol);
            }
            text
        })
}

proptest! {
    #[test]
    fn patching_twice_equals_patching_once(text in source_text()) {
        let rules = builtin_rules().unwrap();
        let once = patch_text(&text, &rules);
        let twice = patch_text(&once.text, &rules);
        prop_assert_eq!(&twice.text, &once.text);
        prop_assert_eq!(twice.total_matches(), 0);
    }

    #[test]
    fn text_without_targets_is_untouched(
        lines in prop::collection::vec(noise_line(), 0..24),
        eol in prop_oneof![Just("\n"), Just("\r\n")],
    ) {
        let text = lines.join(eol);
        prop_assume!(!text.contains("ObjectSizeCalculator"));
        prop_assume!(!text.contains("System.out.println"));

        let rules = builtin_rules().unwrap();
        let patched = patch_text(&text, &rules);
        prop_assert_eq!(&patched.text, &text);
        prop_assert_eq!(patched.total_matches(), 0);
    }

    #[test]
    fn patching_is_deterministic(text in source_text()) {
        let rules = builtin_rules().unwrap();
        prop_assert_eq!(patch_text(&text, &rules), patch_text(&text, &rules));
    }
}
