//! `sentinel check` — scan a path for hardcoded secrets, then offer to
//! move each one into the vault.
//!
//! The scan itself is read-only.  Remediation prompts only run when
//! stdin is a terminal and `--no-fix` was not passed; the vault is
//! unlocked lazily, on the first finding the user chooses to store.

use std::fs;
use std::io::{self, IsTerminal};
use std::path::Path;

use dialoguer::{Input, Select};

use crate::cli::output;
use crate::cli::{build_manager, prompt_password, Cli};
use crate::crypto::CipherSession;
use crate::errors::{Result, SentinelError};
use crate::remediation;
use crate::scanner::{Finding, PatternSet, Scanner};
use crate::vault::{AddOutcome, VaultManager};

/// Execute the `check` command.
pub fn execute(cli: &Cli, path: &str, no_fix: bool) -> Result<()> {
    let (manager, settings) = build_manager(cli)?;

    output::info(&format!("Scanning {path}"));

    let patterns = PatternSet::builtin()?;
    let scanner = Scanner::new(patterns).with_extra_extensions(settings.scan_extensions.clone());
    let findings = scanner.scan(Path::new(path))?;

    if findings.is_empty() {
        output::success("No secrets found. You're all clean!");
        return Ok(());
    }

    output::warning(&format!(
        "{} potential secret(s) found",
        findings.len()
    ));
    output::print_findings_table(&findings);

    if no_fix || !io::stdin().is_terminal() {
        output::tip("Re-run `sentinel check` in a terminal to fix findings interactively.");
        return Ok(());
    }

    remediate(&manager, &findings)
}

/// Walk the findings and act on the user's choice for each.
fn remediate(manager: &VaultManager, findings: &[Finding]) -> Result<()> {
    let mut session: Option<CipherSession> = None;

    for finding in findings {
        println!();
        output::info(&format!(
            "{} in {} (line {})",
            finding.label,
            finding.file.display(),
            finding.line
        ));
        println!("    {}", finding.text);

        let options = [
            "Store in vault and replace with load_key()",
            "Store in vault only",
            "Ignore",
        ];
        let choice = Select::new()
            .with_prompt("Remediation")
            .items(&options)
            .default(2)
            .interact()
            .map_err(|e| SentinelError::CommandFailed(format!("select prompt: {e}")))?;

        if choice == 2 {
            continue;
        }

        // Re-read the flagged line from disk: earlier fixes in the same
        // file may have changed its content (never its line count).
        let Ok(content) = fs::read_to_string(&finding.file) else {
            output::warning("File is no longer readable — skipping.");
            continue;
        };
        let Some(raw_line) = content.lines().nth(finding.line - 1) else {
            output::warning("Line is no longer present — skipping.");
            continue;
        };

        let Some(secret) = remediation::extract_secret(raw_line) else {
            output::warning("No quoted literal on this line — store it manually with `sentinel add`.");
            continue;
        };
        let secret = secret.to_string();

        let key_name: String = Input::new()
            .with_prompt("Key name for this secret (e.g. 'openai_key')")
            .interact_text()
            .map_err(|e| SentinelError::CommandFailed(format!("input prompt: {e}")))?;

        // Unlock once, on the first stored finding.
        if session.is_none() {
            let password = prompt_password()?;
            session = Some(manager.unlock_or_init(password.as_bytes())?);
        }
        let Some(active) = session.as_ref() else {
            continue;
        };

        match manager.add_key(active, &key_name, &secret)? {
            AddOutcome::Added => output::success(&format!("Key '{key_name}' stored in the vault")),
            AddOutcome::Overwrote => {
                output::warning(&format!("Key '{key_name}' already existed — value overwritten"))
            }
        }

        if choice == 0 {
            let new_line = remediation::reference_line(raw_line, &key_name);
            remediation::rewrite_line(&finding.file, finding.line, &new_line)?;
            output::success(&format!(
                "Replaced line {} of {} with a vault reference",
                finding.line,
                finding.file.display()
            ));
        }
    }

    Ok(())
}
