//! Error kinds shared by the projection and listing cores

use thiserror::Error;

/// Errors raised by the pure cores.
///
/// Both cores validate their input up front, so an error always means
/// nothing was computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },
}

impl CoreError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        CoreError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
