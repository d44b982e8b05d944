//! Static secret scanner.
//!
//! Walks a file tree, applies the pattern library to every line of
//! every eligible file, and produces findings.  The scanner only ever
//! reads: per-file problems (permissions, binary junk, races with
//! deletion) are skipped silently and the walk continues.

pub mod patterns;

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::errors::{Result, SentinelError};
pub use patterns::{PatternSet, SecretPattern};

/// File extensions the scanner will open.
///
/// Source, config, and text formats where hardcoded keys usually hide.
const SCAN_EXTENSIONS: &[&str] = &[
    "py", "js", "ts", "jsx", "tsx", "rs", "go", "rb", "java", "env", "json", "yml", "yaml",
    "toml", "ini", "cfg", "sh", "txt",
];

/// One matched line in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Path of the file containing the match.
    pub file: PathBuf,
    /// 1-indexed line number.
    pub line: usize,
    /// The matched line, trimmed.
    pub text: String,
    /// Label of the rule that matched.
    pub label: String,
}

/// Pattern-matching scanner over a file tree.
pub struct Scanner {
    patterns: PatternSet,
    extra_extensions: Vec<String>,
}

impl Scanner {
    /// Build a scanner around a compiled pattern set.
    pub fn new(patterns: PatternSet) -> Self {
        Self {
            patterns,
            extra_extensions: Vec::new(),
        }
    }

    /// Extend the extension allow-list (from `.sentinel.toml`).
    pub fn with_extra_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extra_extensions = extensions;
        self
    }

    /// Scan a file or directory tree rooted at `root`.
    ///
    /// A missing root is an error; unreadable files *inside* an
    /// existing root are merely omitted from the results.  Findings
    /// come back in file-visit order (stable within a run — entries are
    /// visited name-sorted), ascending line number within a file.
    pub fn scan(&self, root: &Path) -> Result<Vec<Finding>> {
        if !root.exists() {
            return Err(SentinelError::ScanPathNotFound(root.to_path_buf()));
        }

        let mut findings = Vec::new();

        if root.is_file() {
            if self.is_eligible(root) {
                self.scan_file(root, &mut findings);
            }
            return Ok(findings);
        }

        for entry in WalkDir::new(root).sort_by_file_name() {
            // Unreadable directory entries are skipped, not fatal.
            let Ok(entry) = entry else { continue };
            if entry.file_type().is_file() && self.is_eligible(entry.path()) {
                self.scan_file(entry.path(), &mut findings);
            }
        }

        Ok(findings)
    }

    /// Scan one file, appending at most one finding per line.
    ///
    /// Reads permissively: bytes that are not valid UTF-8 are replaced
    /// rather than failing the file.  Read errors skip the file.
    fn scan_file(&self, path: &Path, findings: &mut Vec<Finding>) {
        let Ok(bytes) = fs::read(path) else { return };
        let content = String::from_utf8_lossy(&bytes);

        for (index, line) in content.lines().enumerate() {
            if let Some(pattern) = self.patterns.match_line(line) {
                findings.push(Finding {
                    file: path.to_path_buf(),
                    line: index + 1,
                    text: line.trim().to_string(),
                    label: pattern.label.to_string(),
                });
            }
        }
    }

    /// Whether the allow-list covers this path.
    ///
    /// `.env` itself has no `Path::extension`, so the basename gets a
    /// separate check.
    fn is_eligible(&self, path: &Path) -> bool {
        if let Some(name) = path.file_name() {
            if name.to_string_lossy() == ".env" {
                return true;
            }
        }

        let Some(ext) = path.extension() else {
            return false;
        };
        let ext = ext.to_string_lossy();

        SCAN_EXTENSIONS.iter().any(|e| *e == ext)
            || self.extra_extensions.iter().any(|e| *e == ext)
    }
}
