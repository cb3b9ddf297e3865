//! Service Ports
//!
//! Abstract interfaces for external services.

mod assistant;
mod embedding;
mod llm_provider;
mod token_counter;

pub use assistant::*;
pub use embedding::*;
pub use llm_provider::*;
pub use token_counter::*;
