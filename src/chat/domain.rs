use crate::shared::ids::DocumentId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: String,
    pub msg: String,
}

impl ChatMessage {
    pub fn new(sender: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            msg: msg.into(),
        }
    }
}

/// Fields of a chat before the store assigns it an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChat {
    pub name: String,
    pub created_by: String,
    pub members: Vec<String>,
    pub messages: Vec<ChatMessage>,
}

impl NewChat {
    pub fn owned_by(name: &str, principal: &str) -> Self {
        Self {
            name: name.to_string(),
            created_by: principal.to_string(),
            members: vec![principal.to_string()],
            messages: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatDocument {
    pub id: DocumentId,
    pub created_at: i64,
    pub name: String,
    pub created_by: String,
    pub members: Vec<String>,
    pub messages: Vec<ChatMessage>,
}

impl ChatDocument {
    pub fn from_new(id: DocumentId, created_at: i64, chat: NewChat) -> Self {
        Self {
            id,
            created_at,
            name: chat.name,
            created_by: chat.created_by,
            members: chat.members,
            messages: chat.messages,
        }
    }

    pub fn is_member(&self, principal: &str) -> bool {
        self.members.iter().any(|member| member == principal)
    }

    pub fn is_owner(&self, principal: &str) -> bool {
        self.created_by == principal
    }
}

/// Chat names double as directory names, so they must be reachable by `cd`.
pub fn validate_chat_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("chat name must be non-empty".to_string());
    }
    if name == "." || name == ".." {
        return Err(format!("`{name}` is reserved"));
    }
    if name.chars().any(|ch| ch == '/' || ch.is_whitespace()) {
        return Err("chat name must not contain '/' or whitespace".to_string());
    }
    Ok(())
}
