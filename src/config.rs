//! The ordered list of files the patcher works on.

use std::path::{Path, PathBuf};

/// Files that import `ObjectSizeCalculator`, relative to the project root.
pub const DEFAULT_TARGETS: [&str; 3] = [
    "src/index/PVLB_tree_index/PVLBTree.java",
    "src/index/PVLB_tree_index/PVLBTreeChain.java",
    "src/index/HPVL_tree_index/HPVLIndex.java",
];

/// Ordered list of files to patch, handed to the engine as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetList {
    files: Vec<PathBuf>,
}

impl TargetList {
    pub fn new(files: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            files: files.into_iter().map(Into::into).collect(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(DEFAULT_TARGETS)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Default for TargetList {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_three_files_in_order() {
        let targets = TargetList::builtin();
        let files: Vec<_> = targets.iter().collect();
        assert_eq!(
            files,
            [
                Path::new("src/index/PVLB_tree_index/PVLBTree.java"),
                Path::new("src/index/PVLB_tree_index/PVLBTreeChain.java"),
                Path::new("src/index/HPVL_tree_index/HPVLIndex.java"),
            ]
        );
        assert_eq!(targets.len(), 3);
        assert!(!targets.is_empty());
        assert_eq!(TargetList::default(), targets);
    }

    #[test]
    fn new_keeps_given_order() {
        let targets = TargetList::new(["b.java", "a.java"]);
        let files: Vec<_> = targets.iter().collect();
        assert_eq!(files, [Path::new("b.java"), Path::new("a.java")]);
        assert!(TargetList::new(Vec::<PathBuf>::new()).is_empty());
    }
}
