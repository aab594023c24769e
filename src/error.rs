//! Error type shared by every stage of the transform pipeline.

extern crate alloc;
use alloc::format;
use alloc::string::String;
use core::fmt;

/// Prefix of every diagnostic line, e.g. `HARR-ERR-103: ...`.
pub const ERROR_PREFIX: &str = "HARR-ERR";

/// Errors that can occur while acquiring, validating or transforming samples.
///
/// Each variant maps to a fixed process exit code via [`HaarError::code`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HaarError {
    /// The command line could not be parsed.
    InvalidArguments { message: String },
    /// Initial storage for samples could not be obtained.
    Allocation { bytes: usize },
    /// The transform's auxiliary buffer could not be obtained.
    BufferAllocation { bytes: usize },
    /// Growing the sample buffer failed. The previous contents are retained.
    Reallocation { bytes: usize },
    /// The sample count is zero or not a power of two.
    InvalidSize { length: usize },
    /// Reading input or writing output failed.
    #[cfg(feature = "std")]
    Io { kind: std::io::ErrorKind },
}

impl HaarError {
    /// Exit code reported to the caller for this error.
    pub fn code(&self) -> u8 {
        match self {
            HaarError::InvalidArguments { .. } => 100,
            HaarError::Allocation { .. } | HaarError::BufferAllocation { .. } => 101,
            HaarError::Reallocation { .. } => 102,
            HaarError::InvalidSize { .. } => 103,
            #[cfg(feature = "std")]
            HaarError::Io { .. } => 104,
        }
    }

    /// Full diagnostic line in the form `HARR-ERR-<code>: <message>`.
    pub fn diagnostic(&self) -> String {
        format!("{}-{:03}: {}", ERROR_PREFIX, self.code(), self)
    }
}

impl fmt::Display for HaarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HaarError::InvalidArguments { message } => write!(f, "{}", message.trim_end()),
            HaarError::Allocation { bytes } => write!(f, "Allocation error, bytes {}.", bytes),
            HaarError::BufferAllocation { bytes } => {
                write!(f, "Allocation error (buffer), bytes {}.", bytes)
            }
            HaarError::Reallocation { bytes } => write!(f, "Reallocation error, bytes {}.", bytes),
            HaarError::InvalidSize { length } => {
                write!(f, "Input size not a power of 2, actual value {}.", length)
            }
            #[cfg(feature = "std")]
            HaarError::Io { kind } => write!(f, "I/O error: {}.", kind),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HaarError {}

#[cfg(feature = "std")]
impl From<std::io::Error> for HaarError {
    fn from(err: std::io::Error) -> Self {
        HaarError::Io { kind: err.kind() }
    }
}
