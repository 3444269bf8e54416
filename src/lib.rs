pub mod api;
pub mod auth;
pub mod compose;
pub mod config;
pub mod domain;
pub mod folders;
pub mod mailbox;
pub mod terminal;
