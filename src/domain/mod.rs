pub mod builder;
pub mod email;
pub mod mailbox;
