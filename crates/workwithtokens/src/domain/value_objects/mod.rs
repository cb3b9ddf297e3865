//! Value Objects
//!
//! Immutable objects defined by their attributes rather than identity.

mod embedding_provider;
mod model_settings;
mod provider;

pub use embedding_provider::*;
pub use model_settings::*;
pub use provider::*;
