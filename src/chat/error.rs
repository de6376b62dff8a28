use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Chat does not exist")]
    NotFound,
    #[error("Unauthorized, user does not own the chat")]
    Forbidden,
    #[error("Unauthorized, user is not a member of the chat")]
    NotAMember,
    #[error("Chat with this name already exists")]
    AlreadyExists,
    #[error("invalid chat name `{name}`: {reason}")]
    InvalidName { name: String, reason: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}
