//! Top-level error returned from `main`. Any variant ends the process with a
//! non-zero exit code after the terminal has been restored.

use std::convert::Infallible;
use std::fmt;
use std::io;

use crate::chat::SessionError;
use crate::core::credentials::CredentialError;

#[derive(Debug)]
pub enum AppError {
    Credentials(CredentialError),
    Session(SessionError),
    Terminal(io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Credentials(e) => write!(f, "credentials: {e}"),
            AppError::Session(e) => write!(f, "chat session: {e}"),
            AppError::Terminal(e) => write!(f, "terminal: {e}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Credentials(e) => Some(e),
            AppError::Session(e) => Some(e),
            AppError::Terminal(e) => Some(e),
        }
    }
}

impl From<CredentialError> for AppError {
    fn from(e: CredentialError) -> Self {
        AppError::Credentials(e)
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::Session(e)
    }
}

// Backends that cannot fail, such as ratatui's TestBackend
impl From<Infallible> for AppError {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}

impl From<io::Error> for AppError {
    fn from(e: io::Error) -> Self {
        AppError::Terminal(e)
    }
}
