//! Common Utilities
//!
//! Shared error and result types used across the engine.

pub mod error;
pub mod result;

pub use error::{EngineError, ProviderError};
pub use result::EngineResult;
