//! Domain Services
//!
//! Stateless logic shared by the server and the CLI.

pub mod pricing;
pub mod prompts;
pub mod reply;
pub mod vector;
