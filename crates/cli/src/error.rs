//! Error types for command dispatch and execution

use thiserror::Error;

use crate::exit_code::ExitCode;

/// Malformed invocation
///
/// By the time one of these is returned the usage text has already been
/// printed; the caller only has to exit.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum UsageError {
    #[error("no command given")]
    MissingCommand,

    #[error("unexpected arguments: {}", .0.join(" "))]
    UnexpectedArguments(Vec<String>),
}

/// Failure while a command runs
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// A remote call failed; `call` names the call site
    #[error("{call}: {source}")]
    ApiFailure {
        call: &'static str,
        source: c14_core::Error,
    },

    #[error("Please add an SSH Key here: https://console.online.net/en/account/ssh-keys")]
    NoCredentials,

    #[error("Failed to initialize the API client: {0}")]
    Connect(#[source] c14_core::Error),

    #[error("Unknown help topic '{0}'. Run 'c14 help' for the list of commands")]
    UnknownHelpTopic(String),

    #[error("Command '{0}' was executed before its flags were validated")]
    NotValidated(&'static str),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl ExecutionError {
    /// Wrap a remote failure with the call that produced it
    pub fn api(call: &'static str) -> impl FnOnce(c14_core::Error) -> Self {
        move |source| Self::ApiFailure { call, source }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::ApiFailure { source, .. } | Self::Connect(source) => ExitCode::from_core(source),
            Self::NoCredentials => ExitCode::PreconditionFailed,
            Self::UnknownHelpTopic(_) => ExitCode::UsageError,
            Self::NotValidated(_) | Self::Output(_) => ExitCode::GeneralError,
        }
    }
}

/// Everything `Dispatcher::dispatch` can fail with
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("unknown command '{0}'. Run 'c14 help' for usage")]
    UnknownCommand(String),

    #[error(transparent)]
    Usage(#[from] UsageError),

    /// Flag parsing failed, or `--help`/`--version` was requested
    #[error(transparent)]
    Flags(#[from] clap::Error),

    #[error(transparent)]
    Execution(#[from] ExecutionError),
}

impl DispatchError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::UnknownCommand(_) | Self::Usage(_) => ExitCode::UsageError,
            Self::Flags(e) if !e.use_stderr() => ExitCode::Success,
            Self::Flags(_) => ExitCode::UsageError,
            Self::Execution(e) => e.exit_code(),
        }
    }
}
