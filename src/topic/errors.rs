use thiserror::Error;

use crate::config_repository::ConfigRepositoryError;

/// Possible errors from the [`super::Topic`] aggregate.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
pub enum TopicError {
    /// A Partition of the Topic layout has no earliest/latest offsets: the Topic can't be aggregated.
    #[error("Partition Offsets '{1}' doesn't exist for topic '{0}'")]
    MissingOffsets(String, i32),

    /// The requested Partition is not part of the Topic.
    #[error("Partition '{1}' doesn't exist for topic '{0}'")]
    UnknownPartition(String, i32),

    /// Failed to look up the Topic configuration.
    #[error(transparent)]
    ConfigLookup(#[from] ConfigRepositoryError),
}

pub type TopicResult<T> = Result<T, TopicError>;
