//! Common Result Type

use super::error::EngineError;

/// Engine result type
pub type EngineResult<T> = Result<T, EngineError>;
