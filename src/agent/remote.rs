//! HTTP-backed command interpreter (OpenAI-compatible chat endpoint).
//!
//! Behind the `ai-agent` feature flag.  The API key is itself loaded
//! from the vault before this interpreter is constructed, so the agent
//! never needs credentials in the environment or on the command line.

use serde::{Deserialize, Serialize};

use super::CommandInterpreter;
use crate::errors::{Result, SentinelError};

/// Instructions that keep replies parseable by `parse_reply`.
const SYSTEM_PROMPT: &str = "You are Sentinel Assistant. You help users manage their API keys \
and scan projects for leaked secrets.\n\
If the user gives a clear task, respond with only the exact command:\n\
- add\n- list\n- delete <key>\n- rotate <key>\n- load <key>\n- check <directory>\n- exit\n\
If the user asks a question or says hello, respond naturally and helpfully.\n\
Never mix a command with an explanation. Either respond with a command or a full sentence.";

#[derive(Serialize, Deserialize, Clone)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Conversational interpreter over an OpenAI-compatible
/// `/chat/completions` endpoint.
pub struct ChatCompletionInterpreter {
    endpoint: String,
    api_key: String,
    model: String,
    history: Vec<ChatMessage>,
}

impl ChatCompletionInterpreter {
    pub fn new(endpoint: String, api_key: String, model: String) -> Self {
        let history = vec![ChatMessage {
            role: "system".to_string(),
            content: SYSTEM_PROMPT.to_string(),
        }];

        Self {
            endpoint,
            api_key,
            model,
            history,
        }
    }
}

impl CommandInterpreter for ChatCompletionInterpreter {
    fn interpret(&mut self, input: &str) -> Result<String> {
        self.history.push(ChatMessage {
            role: "user".to_string(),
            content: input.to_string(),
        });

        let body = serde_json::json!({
            "model": self.model,
            "messages": self.history,
            "temperature": 0.3,
            "max_tokens": 300,
        });

        let response = ureq::post(&self.endpoint)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Content-Type", "application/json")
            .send_json(body)
            .map_err(|e| SentinelError::AgentError(format!("request failed: {e}")))?;

        let parsed: ChatResponse = response
            .into_json()
            .map_err(|e| SentinelError::AgentError(format!("malformed response: {e}")))?;

        let reply = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| SentinelError::AgentError("response contained no choices".into()))?;

        self.history.push(ChatMessage {
            role: "assistant".to_string(),
            content: reply.clone(),
        });

        Ok(reply)
    }
}
