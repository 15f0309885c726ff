pub mod common;
pub mod create;
pub mod init;
pub mod list;
pub mod output;
pub mod show;
pub mod transition;
pub mod types;
