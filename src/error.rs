//! Error types for schemectl

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum SchemeError {
    /// IO error
    Io(io::Error),
    /// A scheme with the same interface and name is already saved
    AlreadyExists { interface: String, name: String },
    /// No option mapping rule for this encryption family
    UnsupportedEncryption(String),
    /// ifup exited non-zero
    ActivationFailed { scheme: String, code: Option<i32>, output: String },
    /// ifdown exited non-zero
    DeactivationFailed { interface: String, code: Option<i32>, output: String },
    /// ifup succeeded but reported no bound address
    NoAddressBound { scheme: String },
    /// Invalid parameter
    InvalidParameter(String),
    /// Configuration error
    ConfigError(String),
}

impl fmt::Display for SchemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemeError::Io(e) => write!(f, "IO error: {}", e),
            SchemeError::AlreadyExists { interface, name } => {
                write!(f, "Scheme {} for interface {} already exists and overwrite is forbidden", name, interface)
            }
            SchemeError::UnsupportedEncryption(kind) => {
                write!(f, "Unsupported encryption type: {}", kind)
            }
            SchemeError::ActivationFailed { scheme, code, output } => {
                if let Some(code) = code {
                    write!(f, "Failed to connect to {} (ifup exited with code {}): {}", scheme, code, output)
                } else {
                    write!(f, "Failed to connect to {}: {}", scheme, output)
                }
            }
            SchemeError::DeactivationFailed { interface, code, output } => {
                if let Some(code) = code {
                    write!(f, "Failed to disconnect {} (ifdown exited with code {}): {}", interface, code, output)
                } else {
                    write!(f, "Failed to disconnect {}: {}", interface, output)
                }
            }
            SchemeError::NoAddressBound { scheme } => {
                write!(f, "Connected to {} but no address was bound", scheme)
            }
            SchemeError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            SchemeError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for SchemeError {}

impl From<io::Error> for SchemeError {
    fn from(error: io::Error) -> Self {
        SchemeError::Io(error)
    }
}

pub type SchemeResult<T> = Result<T, SchemeError>;
