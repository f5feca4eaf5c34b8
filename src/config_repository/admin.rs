use std::sync::Arc;

use async_trait::async_trait;
use rdkafka::{
    admin::{AdminClient, AdminOptions, ResourceSpecifier},
    client::DefaultClientContext,
    types::RDKafkaErrorCode,
};
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;

use super::errors::{ConfigRepositoryError, ConfigRepositoryResult};
use super::{Config, ConfigRepository};

/// [`ConfigRepository`] backed by a Kafka [`AdminClient`].
///
/// Every lookup is a single `DescribeConfigs` request, bounded by `request_timeout`.
/// No retries are attempted: failures are returned to the caller.
pub struct AdminConfigRepository {
    admin_client: Arc<AdminClient<DefaultClientContext>>,
    request_timeout: Duration,
    shutdown_token: CancellationToken,
}

impl AdminConfigRepository {
    /// Create a new [`AdminConfigRepository`].
    ///
    /// # Arguments
    ///
    /// * `admin_client` - Kafka Admin Client, used to describe Topic configurations
    /// * `request_timeout` - How long to wait for the Cluster to respond
    /// * `shutdown_token` - When cancelled, in-flight lookups are interrupted
    pub fn new(
        admin_client: Arc<AdminClient<DefaultClientContext>>,
        request_timeout: Duration,
        shutdown_token: CancellationToken,
    ) -> Self {
        Self {
            admin_client,
            request_timeout,
            shutdown_token,
        }
    }
}

#[async_trait]
impl ConfigRepository for AdminConfigRepository {
    async fn find_by_topic(&self, topic: &str) -> ConfigRepositoryResult<Vec<Config>> {
        let specifiers = [ResourceSpecifier::Topic(topic)];
        let opts = AdminOptions::new().request_timeout(Some(self.request_timeout));

        trace!("Describing configuration of Topic '{}'", topic);
        let res = tokio::select! {
            res = self.admin_client.describe_configs(&specifiers, &opts) => res,
            _ = self.shutdown_token.cancelled() => {
                return Err(ConfigRepositoryError::Interrupted(topic.to_string()));
            },
        };

        let resources =
            res.map_err(|e| ConfigRepositoryError::Execution(topic.to_string(), e.to_string()))?;

        let mut configs = Vec::new();
        for resource in resources {
            match resource {
                Ok(cr) => configs.extend(cr.entries.into_iter().map(|ce| Config {
                    name: ce.name,
                    value: ce.value,
                    is_default: ce.is_default,
                    is_read_only: ce.is_read_only,
                    is_sensitive: ce.is_sensitive,
                })),
                Err(RDKafkaErrorCode::UnknownTopicOrPartition) => {
                    return Err(ConfigRepositoryError::ResourceNotFound(topic.to_string()));
                },
                Err(code) => {
                    return Err(ConfigRepositoryError::Execution(topic.to_string(), code.to_string()));
                },
            }
        }

        debug!("Fetched {} configuration entries of Topic '{}'", configs.len(), topic);
        Ok(configs)
    }
}
