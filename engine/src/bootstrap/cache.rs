//! Per-identity runtime cache entries.

use std::fmt;
use std::sync::Arc;

use crate::manifest::Manifest;
use crate::runtime::Runtime;

use super::telemetry::LoadSource;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Current,
    User(String),
}

impl CacheKey {
    pub fn source(&self) -> LoadSource {
        match self {
            Self::Current => LoadSource::Current,
            Self::User(_) => LoadSource::ByUser,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            Self::Current => None,
            Self::User(id) => Some(id),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Current => write!(f, "current"),
            Self::User(id) => write!(f, "user:{}", id),
        }
    }
}

/// Immutable once stored; a refresh replaces the whole entry.
#[derive(Debug)]
pub struct CacheEntry {
    pub runtime: Arc<Runtime>,
    pub manifest: Arc<Manifest>,
    pub expires_at_ms: i64,
}

impl CacheEntry {
    pub fn is_fresh(&self, now_ms: i64) -> bool {
        self.expires_at_ms > now_ms
    }
}
