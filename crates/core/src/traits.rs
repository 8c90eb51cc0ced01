//! OnlineApi trait definition
//!
//! This trait defines the interface for the C14 operations the CLI needs.
//! It allows the CLI to be decoupled from the specific HTTP client implementation.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A previously registered SSH key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshKey {
    /// Unique reference used to authorize archive access
    pub uuid_ref: String,

    /// Free-form description given at registration
    #[serde(default)]
    pub description: String,

    /// Key fingerprint
    #[serde(default)]
    pub fingerprint: String,
}

/// At-rest encryption setting for an archive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CryptoMode {
    #[serde(rename = "aes-256-cbc")]
    Aes256Cbc,
    #[serde(rename = "none")]
    None,
}

impl CryptoMode {
    /// Map the on/off crypto flag to the cipher identifier sent upstream
    pub const fn from_enabled(enabled: bool) -> Self {
        if enabled { Self::Aes256Cbc } else { Self::None }
    }

    /// Wire identifier
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Aes256Cbc => "aes-256-cbc",
            Self::None => "none",
        }
    }
}

impl fmt::Display for CryptoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to create a safe (if missing) and an SSH archive in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateBucketRequest {
    /// Safe to create or reuse
    pub safe_name: String,

    /// Archive name
    pub archive_name: String,

    /// Archive description; the API rejects an empty one
    pub description: String,

    /// SSH key references allowed on the bucket
    pub ssh_keys: Vec<String>,

    /// Platform selectors (datacenters)
    pub platforms: Vec<String>,

    /// Days before the archive is locked
    pub days: u32,

    /// Hide the waiting spinner
    pub quiet: bool,

    /// Storage parity mode
    pub parity: String,

    /// Request a large-capacity bucket
    pub large_bucket: bool,

    /// At-rest encryption
    pub crypto: CryptoMode,
}

/// Identifiers of the resources touched by a create
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedBucket {
    /// Safe holding the archive
    pub safe_uuid: String,

    /// The new archive
    pub archive_uuid: String,
}

/// Trait for C14 storage operations
///
/// This trait is implemented by the HTTP adapter and can be mocked for testing.
#[async_trait]
pub trait OnlineApi: Send + Sync {
    /// List the SSH keys registered on the account, in the order the API returns them
    async fn list_ssh_keys(&self) -> Result<Vec<SshKey>>;

    /// Create (or reuse) the safe, create the archive in it, and wait for its bucket
    async fn create_ssh_bucket_from_scratch(
        &self,
        request: &CreateBucketRequest,
    ) -> Result<CreatedBucket>;
}

/// Builds an API client on demand
///
/// Commands that never touch the API (help, usage errors) never connect, so
/// a missing token only fails the commands that need one.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn OnlineApi>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crypto_mode_from_flag() {
        assert_eq!(CryptoMode::from_enabled(true).as_str(), "aes-256-cbc");
        assert_eq!(CryptoMode::from_enabled(false).as_str(), "none");
    }

    #[test]
    fn test_crypto_mode_serializes_as_identifier() {
        assert_eq!(
            serde_json::to_string(&CryptoMode::Aes256Cbc).unwrap(),
            "\"aes-256-cbc\""
        );
        assert_eq!(serde_json::to_string(&CryptoMode::None).unwrap(), "\"none\"");
    }

    #[test]
    fn test_ssh_key_tolerates_missing_fields() {
        let key: SshKey = serde_json::from_str(r#"{"uuid_ref":"k-1"}"#).unwrap();
        assert_eq!(key.uuid_ref, "k-1");
        assert!(key.description.is_empty());
    }
}
