//! Process exit codes of the c14 CLI
//!
//! Scripts rely on these values. Renumbering one is a breaking change.

/// Exit status of a c14 invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Success = 0,

    /// Anything without a more specific code
    GeneralError = 1,

    /// Unknown command, bad flags, stray arguments, unusable config or token
    UsageError = 2,

    /// The API could not be reached
    NetworkError = 3,

    /// The API rejected the token
    AuthError = 4,

    /// The API answered 404
    NotFound = 5,

    /// The account has no SSH key to authorize the archive with
    PreconditionFailed = 6,
}

impl ExitCode {
    /// Value for `std::process::exit`
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    const fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::GeneralError),
            2 => Some(Self::UsageError),
            3 => Some(Self::NetworkError),
            4 => Some(Self::AuthError),
            5 => Some(Self::NotFound),
            6 => Some(Self::PreconditionFailed),
            _ => None,
        }
    }

    /// Exit code for an error raised by c14-core
    pub const fn from_core(error: &c14_core::Error) -> Self {
        match Self::from_i32(error.exit_code()) {
            Some(code) => code,
            None => Self::GeneralError,
        }
    }
}
