//! c14 CLI library
//!
//! This module exports the CLI components for use by the binary and
//! integration tests.

pub mod commands;
pub mod dispatcher;
pub mod error;
pub mod exit_code;
pub mod logging;
pub mod output;

pub use dispatcher::{Dispatcher, GlobalOptions};
pub use error::{DispatchError, ExecutionError, UsageError};
pub use exit_code::ExitCode;
