pub mod evaluate;
pub mod init;
pub mod list_questions;
pub mod validate;
