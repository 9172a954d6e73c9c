pub mod client;
pub mod provider;

pub use client::{status_error, EngineClient, ValueSource};
pub use provider::{user_manifest_path, HttpManifestProvider, CURRENT_MANIFEST_PATH};
