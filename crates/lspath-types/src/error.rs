use std::fmt;

/// Result type for lspath-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the types layer
#[derive(Debug)]
pub enum Error {
    /// A shell name that is neither zsh nor bash
    UnknownShell(String),

    /// A startup mode label that does not match any known phase
    UnknownMode(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownShell(name) => write!(f, "Unsupported shell: {}", name),
            Error::UnknownMode(label) => write!(f, "Unknown startup mode: {}", label),
        }
    }
}

impl std::error::Error for Error {}
