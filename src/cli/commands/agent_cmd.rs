//! `sentinel agent` — conversational REPL over the vault and scanner.
//!
//! Free text goes to the interpreter; the reply is parsed into a
//! command and dispatched through the same `VaultManager` / `Scanner`
//! entry points the plain subcommands use.  One validated session is
//! held for the whole REPL, so the password is asked for once.

use std::path::Path;

use dialoguer::Input;
use zeroize::Zeroizing;

use crate::agent::remote::ChatCompletionInterpreter;
use crate::agent::{parse_reply, AgentCommand, CommandInterpreter};
use crate::cli::output;
use crate::cli::{build_manager, prompt_password, Cli};
use crate::crypto::CipherSession;
use crate::errors::{Result, SentinelError};
use crate::scanner::{PatternSet, Scanner};
use crate::vault::{AddOutcome, VaultManager};

/// Execute the `agent` command.
pub fn execute(cli: &Cli, endpoint: &str, model: &str, api_key_name: &str) -> Result<()> {
    let (manager, settings) = build_manager(cli)?;

    // The interpreter's credentials come from the vault itself.
    let password = prompt_password()?;
    let session = manager.unlock(password.as_bytes())?;
    let api_key = manager.load_key(&session, api_key_name)?;

    let mut interpreter = ChatCompletionInterpreter::new(
        endpoint.to_string(),
        api_key.as_str().to_owned(),
        model.to_string(),
    );

    let scanner =
        Scanner::new(PatternSet::builtin()?).with_extra_extensions(settings.scan_extensions);

    output::info("Sentinel agent is running — type 'exit' anytime to quit.");

    loop {
        let input: String = Input::new()
            .with_prompt("What would you like to do?")
            .interact_text()
            .map_err(|e| SentinelError::CommandFailed(format!("input prompt: {e}")))?;

        if input.trim().is_empty() {
            continue;
        }

        let reply = match interpreter.interpret(&input) {
            Ok(r) => r,
            Err(e) => {
                output::error(&e.to_string());
                continue;
            }
        };

        match parse_reply(&reply) {
            AgentCommand::Exit => {
                output::info("Goodbye!");
                break;
            }
            AgentCommand::Chat(text) => println!("{text}"),
            command => {
                if let Err(e) = dispatch(&manager, &scanner, &session, command) {
                    output::error(&e.to_string());
                }
            }
        }
    }

    Ok(())
}

/// Run one parsed command against the core entry points.
fn dispatch(
    manager: &VaultManager,
    scanner: &Scanner,
    session: &CipherSession,
    command: AgentCommand,
) -> Result<()> {
    match command {
        AgentCommand::Add => {
            let key: String = Input::new()
                .with_prompt("Key name (e.g. 'openai_key')")
                .interact_text()
                .map_err(|e| SentinelError::CommandFailed(format!("input prompt: {e}")))?;
            let value = dialoguer::Password::new()
                .with_prompt(format!("Enter value for {key}"))
                .interact()
                .map_err(|e| SentinelError::CommandFailed(format!("input prompt: {e}")))?;
            let value = Zeroizing::new(value);

            match manager.add_key(session, &key, &value)? {
                AddOutcome::Added => {
                    output::success(&format!("Key '{key}' stored in the vault"))
                }
                AddOutcome::Overwrote => {
                    output::warning(&format!("Key '{key}' already existed — value overwritten"))
                }
            }
        }
        AgentCommand::List => {
            let keys = manager.list_keys()?;
            if keys.is_empty() {
                output::info("No keys stored yet.");
            } else {
                output::print_keys_table(&keys);
            }
        }
        AgentCommand::Delete(key) => {
            manager.delete_key(session, &key)?;
            output::success(&format!("Deleted key '{key}'"));
        }
        AgentCommand::Rotate(key) => {
            let value = dialoguer::Password::new()
                .with_prompt(format!("Enter new value for '{key}'"))
                .interact()
                .map_err(|e| SentinelError::CommandFailed(format!("input prompt: {e}")))?;
            let value = Zeroizing::new(value);
            manager.rotate_key(session, &key, &value)?;
            output::success(&format!("Key '{key}' rotated"));
        }
        AgentCommand::Load(key) => {
            let value = manager.load_key(session, &key)?;
            println!("{}", value.as_str());
        }
        AgentCommand::Check(path) => {
            let findings = scanner.scan(Path::new(&path))?;
            if findings.is_empty() {
                output::success("No secrets found.");
            } else {
                output::print_findings_table(&findings);
            }
        }
        // Exit and Chat are handled by the REPL loop.
        AgentCommand::Exit | AgentCommand::Chat(_) => {}
    }

    Ok(())
}
