//! Lexical path canonicalization.
//!
//! Device paths are compared and embedded into policy exactly as the kernel would resolve
//! them lexically. Nothing here touches the filesystem and symlinks are never followed.

use std::fmt;

/// A path string after lexical cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalPath(String);

impl CanonicalPath {
    /// Clean `raw` lexically. Total: every input yields a path.
    pub fn new(raw: &str) -> Self {
        Self(clean(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Lexically clean a slash-separated path.
///
/// - repeated separators collapse to one
/// - `.` elements are dropped
/// - `..` removes the preceding element; at the root it is dropped
/// - a trailing separator is removed
/// - relative paths stay relative, keeping leading `..` elements
/// - an empty result is `.` (or `/` for rooted input)
pub fn clean(raw: &str) -> String {
    let rooted = raw.starts_with('/');
    let mut stack: Vec<&str> = Vec::new();

    for element in raw.split('/') {
        match element {
            "" | "." => {}
            ".." => {
                if stack.last().is_some_and(|last| *last != "..") {
                    stack.pop();
                } else if !rooted {
                    stack.push("..");
                }
            }
            other => stack.push(other),
        }
    }

    let joined = stack.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_removes_dot() {
        assert_eq!(clean("/dev/./sda1"), "/dev/sda1");
    }

    #[test]
    fn test_clean_collapses_separators() {
        assert_eq!(clean("//dev///sda1"), "/dev/sda1");
    }

    #[test]
    fn test_clean_resolves_dotdot() {
        assert_eq!(clean("/dev/disk/../sda1"), "/dev/sda1");
        assert_eq!(clean("/a/b/c/../../d"), "/a/d");
    }

    #[test]
    fn test_clean_dotdot_at_root_is_dropped() {
        assert_eq!(clean("/../dev/sda1"), "/dev/sda1");
        assert_eq!(clean("/a/../.."), "/");
    }

    #[test]
    fn test_clean_trailing_separator() {
        assert_eq!(clean("/dev/sda1/"), "/dev/sda1");
    }

    #[test]
    fn test_clean_relative_paths_stay_relative() {
        assert_eq!(clean("dev/sda1"), "dev/sda1");
        assert_eq!(clean("../dev/sda1"), "../dev/sda1");
        assert_eq!(clean("a/../../b"), "../b");
        assert_eq!(clean("./"), ".");
    }

    #[test]
    fn test_clean_empty() {
        assert_eq!(clean(""), ".");
        assert_eq!(clean("/"), "/");
    }

    #[test]
    fn test_clean_is_idempotent() {
        for raw in ["/dev/./sda1", "//dev/../dev/nvme0n1p1/", "x/../../y", ""] {
            let once = clean(raw);
            assert_eq!(clean(&once), once);
        }
    }
}
