use super::{ChatFilter, ChatPatch, ChatStore, StoreError};
use crate::chat::{ChatDocument, NewChat};
use crate::shared::ids::DocumentId;
use crate::shared::now_secs;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Default)]
pub struct InMemoryChatStore {
    documents: Mutex<Vec<ChatDocument>>,
}

impl InMemoryChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<ChatDocument>>, StoreError> {
        self.documents.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl ChatStore for InMemoryChatStore {
    fn find(&self, filter: &ChatFilter) -> Result<Vec<ChatDocument>, StoreError> {
        let documents = self.lock()?;
        Ok(documents
            .iter()
            .filter(|chat| filter.matches(chat))
            .cloned()
            .collect())
    }

    fn insert(&self, chat: NewChat) -> Result<DocumentId, StoreError> {
        let mut documents = self.lock()?;
        if documents.iter().any(|existing| existing.name == chat.name) {
            return Err(StoreError::DuplicateName { name: chat.name });
        }
        let id = DocumentId::generate().map_err(StoreError::IdGeneration)?;
        documents.push(ChatDocument::from_new(id.clone(), now_secs(), chat));
        Ok(id)
    }

    fn patch(&self, id: &DocumentId, patch: ChatPatch) -> Result<(), StoreError> {
        let mut documents = self.lock()?;
        let chat = documents
            .iter_mut()
            .find(|chat| chat.id == *id)
            .ok_or_else(|| StoreError::MissingDocument { id: id.to_string() })?;
        patch.apply_to(chat);
        Ok(())
    }

    fn delete(&self, id: &DocumentId) -> Result<(), StoreError> {
        let mut documents = self.lock()?;
        let before = documents.len();
        documents.retain(|chat| chat.id != *id);
        if documents.len() == before {
            return Err(StoreError::MissingDocument { id: id.to_string() });
        }
        Ok(())
    }
}
