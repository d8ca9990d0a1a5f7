use thiserror::Error;

pub type FacadeResult<T> = Result<T, FacadeError>;

/// A failed query against the type-system facade
///
/// Facade failures are never fatal: classification treats them as
/// "not a component" and resolution localizes them to an `Error` subtree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FacadeError {
    pub message: String,
}

impl FacadeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A source unit that could not be loaded
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct LoadError {
    pub message: String,
}

impl LoadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
