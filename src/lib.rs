//! objsize-shim: disables `ObjectSizeCalculator` usage so the index builds on Java 9+
//!
//! `jdk.nashorn.internal.ir.debug.ObjectSizeCalculator` is gone from newer
//! JDKs. This crate rewrites the three source files that use it, commenting
//! out the import, the `long` declarations that call it, and the prints that
//! report those sizes. Everything else in each file is left byte-for-byte.
//!
//! # Architecture
//!
//! - [`rules`]: a fixed, ordered [`RuleSet`] of pattern/template pairs.
//! - [`engine`]: [`patch_text`] applies the rules to a string (pure);
//!   [`patch_file`] and [`patch_all`] add reading, writing, and reporting.
//! - [`io`], [`report`]: the file and console collaborators.
//! - [`config`]: the ordered [`TargetList`] of files.
//!
//! # Safety
//!
//! - Every rule's replacement is immune to its own pattern, so reruns are no-ops
//! - Files are only written when their text changes
//! - Atomic file writes (tempfile + fsync + rename)
//! - Strict UTF-8 on read; the same encoding is written back
//!
//! # Example
//!
//! ```
//! use objsize_shim::{builtin_rules, patch_text};
//!
//! let rules = builtin_rules().unwrap();
//! let patched = patch_text(
//!     "import jdk.nashorn.internal.ir.debug.ObjectSizeCalculator;\n",
//!     &rules,
//! );
//! assert!(patched.text.starts_with("// import"));
//! ```

pub mod config;
pub mod engine;
pub mod io;
pub mod report;
pub mod rules;

// Re-exports
pub use config::{TargetList, DEFAULT_TARGETS};
pub use engine::{
    check_all, patch_all, patch_file, patch_text, PatchError, PatchResult, PatchedText,
    RuleMatches,
};
pub use io::{FileReader, FileWriter, FsFiles, MemoryFiles, RecordingWriter};
pub use report::{ConsoleReporter, Mode, Reporter, Summary};
pub use rules::{builtin_rules, Pattern, Rule, RuleError, RuleSet};
