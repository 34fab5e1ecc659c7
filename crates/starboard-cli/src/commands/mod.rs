pub mod board;
pub mod common;
pub mod completions;
pub mod config;
pub mod prompt;
pub mod session;
pub mod setup;
