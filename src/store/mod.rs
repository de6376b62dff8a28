mod memory;
mod sqlite;

pub use memory::InMemoryChatStore;
pub use sqlite::SqliteChatStore;

use crate::chat::{ChatDocument, ChatMessage, NewChat};
use crate::shared::ids::DocumentId;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite open failed at {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },
    #[error("failed to create chat database parent {path}: {source}")]
    CreateParent {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("sqlite statement failed: {source}")]
    Sql {
        #[source]
        source: rusqlite::Error,
    },
    #[error("failed to encode chat document field `{field}`: {source}")]
    Encode {
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid chat document field `{field}` for {id}: {source}")]
    Decode {
        id: String,
        field: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("chat document {id} does not exist")]
    MissingDocument { id: String },
    #[error("chat `{name}` already exists")]
    DuplicateName { name: String },
    #[error("{0}")]
    IdGeneration(String),
    #[error("chat store lock poisoned")]
    Poisoned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatFilter {
    All,
    NameEquals(String),
}

impl ChatFilter {
    pub fn name(name: &str) -> Self {
        Self::NameEquals(name.to_string())
    }

    pub fn matches(&self, chat: &ChatDocument) -> bool {
        match self {
            Self::All => true,
            Self::NameEquals(name) => chat.name == *name,
        }
    }
}

/// Partial update of a chat document. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatPatch {
    pub members: Option<Vec<String>>,
    pub messages: Option<Vec<ChatMessage>>,
}

impl ChatPatch {
    pub fn members(members: Vec<String>) -> Self {
        Self {
            members: Some(members),
            messages: None,
        }
    }

    pub fn messages(messages: Vec<ChatMessage>) -> Self {
        Self {
            members: None,
            messages: Some(messages),
        }
    }

    pub fn apply_to(self, chat: &mut ChatDocument) {
        if let Some(members) = self.members {
            chat.members = members;
        }
        if let Some(messages) = self.messages {
            chat.messages = messages;
        }
    }
}

/// Document collection holding chats. Each call is atomic per document;
/// concurrent patches of the same document are last-writer-wins.
pub trait ChatStore: Send + Sync {
    /// Matching chats in creation order.
    fn find(&self, filter: &ChatFilter) -> Result<Vec<ChatDocument>, StoreError>;

    fn insert(&self, chat: NewChat) -> Result<DocumentId, StoreError>;

    fn patch(&self, id: &DocumentId, patch: ChatPatch) -> Result<(), StoreError>;

    fn delete(&self, id: &DocumentId) -> Result<(), StoreError>;
}
