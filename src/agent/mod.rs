//! Natural-language command dispatch.
//!
//! The AI side is a pluggable strategy: anything implementing
//! [`CommandInterpreter`] can turn free text into a reply string, and
//! [`parse_reply`] maps that reply onto a concrete command.  The core
//! never talks to a specific provider — the HTTP-backed interpreter
//! lives behind the `ai-agent` feature in `remote`.

#[cfg(feature = "ai-agent")]
pub mod remote;

use crate::errors::Result;

/// A recognized command extracted from an interpreter reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentCommand {
    /// Add a new key interactively.
    Add,
    /// List stored key names.
    List,
    /// Delete the named key.
    Delete(String),
    /// Rotate the named key's value.
    Rotate(String),
    /// Load and print the named key.
    Load(String),
    /// Scan the given path for hardcoded secrets.
    Check(String),
    /// End the session.
    Exit,
    /// Not a command — a conversational reply to show the user as-is.
    Chat(String),
}

/// Turns free text into a reply that [`parse_reply`] understands.
///
/// Implementations forward the text to some completion service along
/// with conversation history; they must never bypass vault session
/// validation themselves — they only *name* commands, the dispatcher
/// executes them through the normal entry points.
pub trait CommandInterpreter {
    fn interpret(&mut self, input: &str) -> Result<String>;
}

/// Parse an interpreter reply into a command.
///
/// The first word selects the command (case-insensitive); the rest is
/// the argument with its original casing intact, because key names and
/// paths are case-sensitive.  Anything that is not a bare command is
/// treated as conversation.
pub fn parse_reply(reply: &str) -> AgentCommand {
    let trimmed = reply.trim();
    let mut parts = trimmed.splitn(2, char::is_whitespace);

    let Some(head) = parts.next() else {
        return AgentCommand::Chat(reply.to_string());
    };
    let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

    match (head.to_ascii_lowercase().as_str(), arg) {
        ("add", None) => AgentCommand::Add,
        ("list", None) => AgentCommand::List,
        ("exit", None) => AgentCommand::Exit,
        ("delete", Some(key)) => AgentCommand::Delete(key.to_string()),
        ("rotate", Some(key)) => AgentCommand::Rotate(key.to_string()),
        ("load", Some(key)) => AgentCommand::Load(key.to_string()),
        ("check", Some(path)) => AgentCommand::Check(path.to_string()),
        _ => AgentCommand::Chat(reply.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_commands_parse() {
        assert_eq!(parse_reply("add"), AgentCommand::Add);
        assert_eq!(parse_reply("list"), AgentCommand::List);
        assert_eq!(parse_reply("exit"), AgentCommand::Exit);
    }

    #[test]
    fn commands_with_arguments_parse() {
        assert_eq!(
            parse_reply("delete openai_key"),
            AgentCommand::Delete("openai_key".into())
        );
        assert_eq!(
            parse_reply("rotate stripe_key"),
            AgentCommand::Rotate("stripe_key".into())
        );
        assert_eq!(
            parse_reply("check ./src"),
            AgentCommand::Check("./src".into())
        );
        assert_eq!(
            parse_reply("load MY_KEY"),
            AgentCommand::Load("MY_KEY".into())
        );
    }

    #[test]
    fn argument_casing_is_preserved() {
        assert_eq!(
            parse_reply("Delete OpenAI_Key"),
            AgentCommand::Delete("OpenAI_Key".into())
        );
    }

    #[test]
    fn command_missing_required_argument_is_chat() {
        assert_eq!(
            parse_reply("delete"),
            AgentCommand::Chat("delete".into())
        );
    }

    #[test]
    fn sentences_are_chat() {
        let reply = "Sure! I can help you manage your API keys.";
        assert_eq!(parse_reply(reply), AgentCommand::Chat(reply.into()));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(
            parse_reply("  check   /tmp/project  "),
            AgentCommand::Check("/tmp/project".into())
        );
    }
}
