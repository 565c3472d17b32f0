use crate::web::models::{HistoryItem, Message, Role};

pub const EMPTY_REPLY_FALLBACK: &str = "I couldn't generate a reply. Please try again.";

pub fn system_prompt(assistant_name: &str) -> String {
    format!(
        "You are {}, a helpful assistant. Reply clearly and briefly unless the user asks for a long explanation.",
        assistant_name
    )
}

/// Returns the trailing `window` items of the history.
pub fn trim_history(history: &[HistoryItem], window: usize) -> &[HistoryItem] {
    let start = history.len().saturating_sub(window);
    &history[start..]
}

/// Anything that is not explicitly an assistant turn is treated as the user.
fn normalize_role(role: &str) -> Role {
    match role.trim().to_lowercase().as_str() {
        "assistant" => Role::Assistant,
        _ => Role::User,
    }
}

/// The conversation forwarded to the provider for a single request.
#[derive(Debug, Clone)]
pub struct Conversation {
    system: String,
    turns: Vec<Message>,
}

impl Conversation {
    pub fn build(system: String, history: &[HistoryItem], message: &str, window: usize) -> Self {
        let mut turns: Vec<Message> = trim_history(history, window)
            .iter()
            .filter_map(|item| {
                let text = item.text.trim();
                if text.is_empty() {
                    return None;
                }
                Some(Message {
                    role: normalize_role(&item.role),
                    content: text.to_string(),
                })
            })
            .collect();

        turns.push(Message {
            role: Role::User,
            content: message.trim().to_string(),
        });

        Self { system, turns }
    }

    pub fn turns(&self) -> &[Message] {
        &self.turns
    }

    /// Single prompt string with one role-prefixed line per turn, ending with
    /// an open `ASSISTANT:` line for the model to complete.
    pub fn render_flat(&self) -> String {
        let mut lines = Vec::with_capacity(self.turns.len() + 2);
        lines.push(format!("SYSTEM: {}", self.system));
        for turn in &self.turns {
            lines.push(format!("{}: {}", turn.role.label(), turn.content));
        }
        lines.push(format!("{}:", Role::Assistant.label()));
        lines.join("\n")
    }

    /// Role-tagged message list for chat-completion style APIs.
    pub fn messages(&self) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.turns.len() + 1);
        messages.push(Message {
            role: Role::System,
            content: self.system.clone(),
        });
        messages.extend(self.turns.iter().cloned());
        messages
    }
}
