use thiserror::Error;

pub type FecResult<T> = Result<T, FecError>;

/// Everything that can go wrong between a caller and the encoder. Encoding itself has no failure
/// modes; these are all contract violations detected at the boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FecError {
    /// The payload does not match the profile's fixed data size
    #[error("Payload must be {expected} bytes, but was {actual}")]
    PayloadSize { expected: usize, actual: usize },

    /// The caller-supplied codeword buffer does not match the profile's code length
    #[error("Codeword buffer must be {expected} bytes, but was {actual}")]
    CodewordSize { expected: usize, actual: usize },

    /// The profile's constants cannot produce a well-formed codeword
    #[error("Invalid profile '{name}': {reason}")]
    InvalidProfile { name: String, reason: String },

    /// No built-in or configured profile has this name
    #[error("Unknown profile '{0}'")]
    UnknownProfile(String),
}
