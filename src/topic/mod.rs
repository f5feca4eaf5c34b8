// Inner modules
mod aggregate;
mod errors;

// Exports
pub use aggregate::Topic;
pub use errors::{TopicError, TopicResult};
