use super::{validate_chat_name, ChatDocument, ChatError, ChatMessage, ChatPolicy, NewChat};
use crate::identity::{CallerIdentity, IdentityProvider};
use crate::shared::ids::DocumentId;
use crate::shared::logging::EventLog;
use crate::store::{ChatFilter, ChatPatch, ChatStore, StoreError};
use serde_json::Value;
use std::sync::Arc;

/// Authorized operations over the chat collection, run as the caller
/// resolved by the identity provider.
#[derive(Clone)]
pub struct ChatService {
    store: Arc<dyn ChatStore>,
    identity: Arc<dyn IdentityProvider>,
    policy: ChatPolicy,
    log: EventLog,
}

impl ChatService {
    pub fn new(
        store: Arc<dyn ChatStore>,
        identity: Arc<dyn IdentityProvider>,
        policy: ChatPolicy,
    ) -> Self {
        Self {
            store,
            identity,
            policy,
            log: EventLog::disabled(),
        }
    }

    pub fn with_log(mut self, log: EventLog) -> Self {
        self.log = log;
        self
    }

    pub fn caller(&self) -> Option<CallerIdentity> {
        self.identity.caller_identity()
    }

    /// Names of the chats the caller is a member of, in creation order.
    pub fn list_chats(&self) -> Result<Vec<String>, ChatError> {
        let principal = self.principal()?;
        let chats = self.store.find(&ChatFilter::All)?;
        Ok(chats
            .into_iter()
            .filter(|chat| chat.is_member(&principal))
            .map(|chat| chat.name)
            .collect())
    }

    pub fn get_chat(&self, name: &str) -> Result<ChatDocument, ChatError> {
        let principal = self.principal()?;
        self.store
            .find(&ChatFilter::name(name))?
            .into_iter()
            .find(|chat| chat.is_member(&principal))
            .ok_or(ChatError::NotFound)
    }

    pub fn create_chat(&self, name: &str) -> Result<DocumentId, ChatError> {
        let principal = self.principal()?;
        validate_chat_name(name).map_err(|reason| ChatError::InvalidName {
            name: name.to_string(),
            reason,
        })?;
        if self.find_by_name(name)?.is_some() {
            return Err(ChatError::AlreadyExists);
        }
        let id = self
            .store
            .insert(NewChat::owned_by(name, &principal))
            .map_err(|err| match err {
                StoreError::DuplicateName { .. } => ChatError::AlreadyExists,
                other => ChatError::Store(other),
            })?;
        self.log.info(
            "chat_created",
            &[
                ("chat", Value::from(name)),
                ("id", Value::from(id.as_str())),
                ("created_by", Value::from(principal)),
            ],
        );
        Ok(id)
    }

    pub fn delete_chat(&self, name: &str) -> Result<(), ChatError> {
        let principal = self.principal()?;
        let chat = self.find_by_name(name)?.ok_or(ChatError::NotFound)?;
        if !chat.is_owner(&principal) {
            return Err(ChatError::Forbidden);
        }
        self.store.delete(&chat.id)?;
        self.log.info(
            "chat_deleted",
            &[
                ("chat", Value::from(name)),
                ("id", Value::from(chat.id.as_str())),
            ],
        );
        Ok(())
    }

    pub fn add_member_to_chat(&self, name: &str, member: &str) -> Result<(), ChatError> {
        let principal = self.principal()?;
        let chat = self.find_by_name(name)?.ok_or(ChatError::NotFound)?;
        if !chat.is_owner(&principal) {
            return Err(ChatError::Forbidden);
        }
        if self.policy.unique_members && chat.is_member(member) {
            return Ok(());
        }
        let mut members = chat.members;
        members.push(member.to_string());
        self.store.patch(&chat.id, ChatPatch::members(members))?;
        self.log.info(
            "member_added",
            &[("chat", Value::from(name)), ("member", Value::from(member))],
        );
        Ok(())
    }

    pub fn add_message_to_chat(&self, name: &str, message: &str) -> Result<(), ChatError> {
        let principal = self.principal()?;
        let chat = self.find_by_name(name)?.ok_or(ChatError::NotFound)?;
        if self.policy.require_membership_to_post && !chat.is_member(&principal) {
            return Err(ChatError::NotAMember);
        }
        let mut messages = chat.messages;
        messages.push(ChatMessage::new(principal.as_str(), message));
        self.store.patch(&chat.id, ChatPatch::messages(messages))?;
        self.log.info(
            "message_added",
            &[("chat", Value::from(name)), ("sender", Value::from(principal))],
        );
        Ok(())
    }

    fn principal(&self) -> Result<String, ChatError> {
        self.identity
            .caller_identity()
            .map(|identity| identity.principal)
            .ok_or(ChatError::Unauthorized)
    }

    fn find_by_name(&self, name: &str) -> Result<Option<ChatDocument>, ChatError> {
        Ok(self.store.find(&ChatFilter::name(name))?.into_iter().next())
    }
}
