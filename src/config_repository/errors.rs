use thiserror::Error;

/// Possible errors from a [`super::ConfigRepository`].
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum ConfigRepositoryError {
    /// The request to fetch configuration failed to execute.
    #[error("Failed to fetch configuration of '{0}': {1}")]
    Execution(String, String),

    /// The request was interrupted before it could complete.
    #[error("Interrupted while fetching configuration of '{0}'")]
    Interrupted(String),

    /// The Cluster doesn't know the resource.
    #[error("Configuration of '{0}' not found")]
    ResourceNotFound(String),
}

pub type ConfigRepositoryResult<T> = Result<T, ConfigRepositoryError>;
