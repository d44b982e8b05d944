//! Remediation of scanner findings.
//!
//! Couples scanner output to the vault: a hardcoded literal is stored
//! under a chosen key name and the offending source line is rewritten
//! to a `load_key("name")` reference.  The interactive option menus
//! live in the CLI layer; this module does the extraction and the file
//! surgery.

use std::fs;
use std::path::Path;

use crate::errors::{Result, SentinelError};

/// Extract the secret literal from a flagged line.
///
/// Takes the first single- or double-quoted span, the way secrets are
/// overwhelmingly written in config and source files.  Returns `None`
/// for unquoted matches, which the caller should treat as "cannot fix
/// automatically".
pub fn extract_secret(line: &str) -> Option<&str> {
    let bytes = line.as_bytes();
    let start = line.find(['"', '\''])?;
    let quote = bytes[start];
    let rest = &line[start + 1..];
    let end = rest.find(quote as char)?;
    if end == 0 {
        return None;
    }
    Some(&rest[..end])
}

/// Build the replacement line referencing the vault.
///
/// When the flagged line parses as `name = "literal"`, the indentation
/// and variable name are preserved; otherwise the key name doubles as
/// the variable:
///
/// ```text
///     api_key = "sk_live_..."   ->      api_key = load_key("stripe_key")
/// ```
pub fn reference_line(original_line: &str, key_name: &str) -> String {
    let trimmed = original_line.trim_start();
    let indent = &original_line[..original_line.len() - trimmed.len()];

    if let Some(variable) = leading_identifier(trimmed) {
        let rest = trimmed[variable.len()..].trim_start();
        if rest.starts_with('=') || rest.starts_with(':') {
            return format!("{indent}{variable} = load_key(\"{key_name}\")");
        }
    }

    format!("{key_name} = load_key(\"{key_name}\")")
}

/// The identifier at the start of `s`, if it starts with one.
fn leading_identifier(s: &str) -> Option<&str> {
    let mut end = 0;
    for (i, c) in s.char_indices() {
        let ok = if i == 0 {
            c == '_' || c.is_ascii_alphabetic()
        } else {
            c == '_' || c.is_ascii_alphanumeric()
        };
        if !ok {
            break;
        }
        end = i + c.len_utf8();
    }
    if end == 0 {
        None
    } else {
        Some(&s[..end])
    }
}

/// Replace line `line_number` (1-indexed) of `path` with `new_line`.
///
/// The rewrite is atomic: the whole file is rewritten to a temp file in
/// the same directory and renamed over the original, so a crash cannot
/// leave a half-edited source file.
pub fn rewrite_line(path: &Path, line_number: usize, new_line: &str) -> Result<()> {
    let content = fs::read_to_string(path)?;
    let mut lines: Vec<&str> = content.lines().collect();

    if line_number == 0 || line_number > lines.len() {
        return Err(SentinelError::CommandFailed(format!(
            "line {line_number} is out of range for {} ({} lines)",
            path.display(),
            lines.len()
        )));
    }

    lines[line_number - 1] = new_line;

    let mut output = lines.join("\n");
    if content.ends_with('\n') {
        output.push('\n');
    }

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, &output)?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn extracts_double_quoted_literal() {
        let line = r#"API_KEY = "AKIA1234567890123456""#;
        assert_eq!(extract_secret(line), Some("AKIA1234567890123456"));
    }

    #[test]
    fn extracts_single_quoted_literal() {
        let line = "token = 'xoxb-1234-abcd'";
        assert_eq!(extract_secret(line), Some("xoxb-1234-abcd"));
    }

    #[test]
    fn no_quotes_means_no_extraction() {
        assert_eq!(extract_secret("API_KEY = AKIA1234567890123456"), None);
    }

    #[test]
    fn empty_quotes_means_no_extraction() {
        assert_eq!(extract_secret(r#"key = """#), None);
    }

    #[test]
    fn reference_line_preserves_indent_and_variable() {
        let line = r#"    api_key = "sk_live_abc""#;
        assert_eq!(
            reference_line(line, "stripe_key"),
            "    api_key = load_key(\"stripe_key\")"
        );
    }

    #[test]
    fn reference_line_handles_colon_assignment() {
        let line = r#"token: "xoxb-1""#;
        assert_eq!(reference_line(line, "slack"), "token = load_key(\"slack\")");
    }

    #[test]
    fn reference_line_falls_back_to_key_name() {
        let line = r#""AKIA1234567890123456""#;
        assert_eq!(
            reference_line(line, "aws_key"),
            "aws_key = load_key(\"aws_key\")"
        );
    }

    #[test]
    fn rewrite_replaces_only_the_target_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.py");
        fs::write(&path, "import os\nkey = \"secret\"\nprint(key)\n").unwrap();

        rewrite_line(&path, 2, "key = load_key(\"my_key\")").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "import os\nkey = load_key(\"my_key\")\nprint(key)\n"
        );
    }

    #[test]
    fn rewrite_out_of_range_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.py");
        fs::write(&path, "one line\n").unwrap();

        assert!(rewrite_line(&path, 5, "x").is_err());
        assert!(rewrite_line(&path, 0, "x").is_err());

        // The file is untouched after a failed rewrite.
        assert_eq!(fs::read_to_string(&path).unwrap(), "one line\n");
    }
}
