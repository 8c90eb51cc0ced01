//! c14-core: Core library for the c14 archive CLI client
//!
//! This crate provides the core functionality for the c14 CLI, including:
//! - Configuration management
//! - The OnlineApi trait and its request/response types
//! - Random archive name generation
//!
//! This crate is designed to be independent of any HTTP client,
//! allowing commands to be tested against mocked backends.

pub mod config;
pub mod error;
pub mod names;
pub mod traits;

pub use config::{ApiSettings, Config, ConfigManager};
pub use error::{Error, Result};
pub use names::{NameGenerator, RandomNames};
pub use traits::{
    Connector, CreateBucketRequest, CreatedBucket, CryptoMode, OnlineApi, SshKey,
};
