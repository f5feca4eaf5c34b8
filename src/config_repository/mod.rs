// Inner modules
mod admin;
mod errors;

use async_trait::async_trait;

// Exports
pub use admin::AdminConfigRepository;
pub use errors::{ConfigRepositoryError, ConfigRepositoryResult};

/// A single configuration entry of a Kafka resource (e.g. a Topic).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Config {
    pub name: String,

    /// Value of the configuration: `None` if it is sensitive, or not set
    pub value: Option<String>,

    pub is_default: bool,
    pub is_read_only: bool,
    pub is_sensitive: bool,
}

impl Config {
    /// Returns `true` if this is the `name` configuration, and its value contains `token`.
    ///
    /// Multi-valued configurations are comma separated (e.g. `compact,delete`),
    /// so this is a substring match.
    pub fn value_contains(&self, name: &str, token: &str) -> bool {
        self.name == name && self.value.as_deref().is_some_and(|v| v.contains(token))
    }
}

/// Source of Kafka resources configuration.
///
/// Implementations are expected to perform I/O: callers should expect (and propagate) errors.
#[async_trait]
pub trait ConfigRepository {
    /// Configuration entries of the given `topic`.
    async fn find_by_topic(&self, topic: &str) -> ConfigRepositoryResult<Vec<Config>>;
}

#[cfg(test)]
mod test {
    use super::*;

    fn build_config(name: &str, value: Option<&str>) -> Config {
        Config {
            name: name.to_string(),
            value: value.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn value_contains_token() {
        assert!(build_config("cleanup.policy", Some("compact")).value_contains("cleanup.policy", "compact"));
        assert!(build_config("cleanup.policy", Some("compact,delete"))
            .value_contains("cleanup.policy", "compact"));
        assert!(!build_config("cleanup.policy", Some("delete")).value_contains("cleanup.policy", "compact"));
        assert!(!build_config("cleanup.policy", None).value_contains("cleanup.policy", "compact"));
        assert!(!build_config("retention.ms", Some("compact")).value_contains("cleanup.policy", "compact"));
    }
}
