pub mod domain;
pub mod error;
pub mod policy;
pub mod service;

pub use domain::{validate_chat_name, ChatDocument, ChatMessage, NewChat};
pub use error::ChatError;
pub use policy::ChatPolicy;
pub use service::ChatService;
