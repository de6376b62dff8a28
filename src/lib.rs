pub mod app;
pub mod chat;
pub mod config;
pub mod identity;
pub mod interpreter;
pub mod shared;
pub mod shell;
pub mod store;
