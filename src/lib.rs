pub mod chat;
pub mod config;
pub mod constants;
pub mod llm_interaction;
pub mod models;
pub mod parse;
pub mod prompt;
pub mod web_server;
