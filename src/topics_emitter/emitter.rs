use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rdkafka::{admin::AdminClient, client::DefaultClientContext, error::KafkaResult};
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{interval, Duration},
};
use tokio_util::sync::CancellationToken;

use super::filter::TopicFilter;
use super::groups::{bound_to, groups_from};
use crate::constants::DEFAULT_CLUSTER_ID;
use crate::internals::Emitter;
use crate::kafka_types::{GroupWithMembers, LogDir, Node, PartitionOffsets, TopicDescription};
use crate::topic::{Topic, TopicError};

const CHANNEL_SIZE: usize = 5;

/// All the selected Topics of the Cluster, aggregated at a given point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicsSnapshot {
    /// When the data of this snapshot was collected from the Cluster
    pub collected_at: DateTime<Utc>,

    /// Cluster identifier, defined as `cluster.id` in Brokers' configuration.
    /// It will be `__none__` if not set on Brokers.
    pub cluster_id: String,

    /// Topics that could be aggregated
    pub topics: Vec<Topic>,

    /// Topics that could not be aggregated, paired with the reason
    pub failed: Vec<(String, TopicError)>,
}

/// Emits [`TopicsSnapshot`] via a provided [`mpsc::channel`].
///
/// It wraps an Admin Kafka Client, regularly requests it for Cluster metadata, Partitions offsets
/// and Consumer Groups, and then aggregates them into a [`TopicsSnapshot`].
///
/// It shuts down when the provided [`CancellationToken`] is cancelled.
pub struct TopicsEmitter {
    admin_client: Arc<AdminClient<DefaultClientContext>>,
    filter: TopicFilter,
    fetch_interval: Duration,
    fetch_timeout: Duration,

    /// Stop after the first fetch, whatever its outcome
    once: bool,
}

impl TopicsEmitter {
    /// Create a new [`TopicsEmitter`]
    ///
    /// # Arguments
    ///
    /// * `admin_client` - Kafka Admin Client, used to fetch the Cluster current status
    /// * `filter` - Selects which Topics to aggregate
    /// * `fetch_interval` - How often to fetch (and emit) a new [`TopicsSnapshot`]
    /// * `fetch_timeout` - How long to wait for each request to the Cluster
    /// * `once` - If `true`, stop after the first fetch: when it fails, nothing is emitted
    pub fn new(
        admin_client: Arc<AdminClient<DefaultClientContext>>,
        filter: TopicFilter,
        fetch_interval: Duration,
        fetch_timeout: Duration,
        once: bool,
    ) -> Self {
        Self {
            admin_client,
            filter,
            fetch_interval,
            fetch_timeout,
            once,
        }
    }

    fn fetch_snapshot(
        admin_client: &AdminClient<DefaultClientContext>,
        filter: &TopicFilter,
        timeout: Duration,
    ) -> KafkaResult<TopicsSnapshot> {
        let client = admin_client.inner();

        let metadata = client.fetch_metadata(None, timeout)?;
        let collected_at = Utc::now();
        let brokers: Vec<Node> = metadata.brokers().iter().map(Node::from).collect();

        let descriptions: Vec<TopicDescription> = metadata
            .topics()
            .iter()
            .filter(|mt| filter.matches(mt.name()))
            .map(|mt| TopicDescription::from_metadata(mt, &brokers))
            .collect();

        let groups = match client.fetch_group_list(None, timeout) {
            Ok(gl) => groups_from(&gl),
            Err(e) => {
                error!("Failed to fetch consumer groups: {e}");
                Vec::new()
            },
        };

        let mut offsets = HashMap::with_capacity(descriptions.len());
        for td in &descriptions {
            trace!("Fetching earliest/latest offset for Partitions of Topic '{}'", td.name);

            let mut topic_offsets = Vec::with_capacity(td.partitions.len());
            for p in &td.partitions {
                match client.fetch_watermarks(&td.name, p.id, timeout) {
                    Ok((earliest, latest)) => topic_offsets.push(PartitionOffsets {
                        partition: p.id,
                        first_offset: earliest,
                        last_offset: latest,
                    }),
                    Err(e) => {
                        error!("Failed to fetch partition '{}:{}' begin/end offsets: {e}", td.name, p.id);
                    },
                }
            }
            offsets.insert(td.name.clone(), topic_offsets);
        }

        // The Admin Client can't list log directories: no on-disk footprint is known
        let (topics, failed) = aggregate(&descriptions, &groups, &[], &offsets);

        Ok(TopicsSnapshot {
            collected_at,
            cluster_id: client.fetch_cluster_id(timeout).unwrap_or_else(|| DEFAULT_CLUSTER_ID.to_string()),
            topics,
            failed,
        })
    }
}

/// Aggregates every [`TopicDescription`] into a [`Topic`].
///
/// A failure to aggregate a Topic doesn't affect the others:
/// it's returned, paired with the name of the Topic, alongside the successfully aggregated ones.
pub(super) fn aggregate(
    descriptions: &[TopicDescription],
    groups: &[Arc<GroupWithMembers>],
    log_dirs: &[LogDir],
    offsets: &HashMap<String, Vec<PartitionOffsets>>,
) -> (Vec<Topic>, Vec<(String, TopicError)>) {
    let mut topics = Vec::with_capacity(descriptions.len());
    let mut failed = Vec::new();

    for td in descriptions {
        let topic_log_dirs: Vec<LogDir> =
            log_dirs.iter().filter(|ld| ld.topic == td.name).cloned().collect();
        let topic_offsets = offsets.get(&td.name).map(Vec::as_slice).unwrap_or_default();

        match Topic::new(td, bound_to(groups, &td.name), &topic_log_dirs, topic_offsets) {
            Ok(t) => topics.push(t),
            Err(e) => {
                warn!("Unable to aggregate Topic '{}': {e}", td.name);
                failed.push((td.name.clone(), e));
            },
        }
    }

    (topics, failed)
}

#[async_trait]
impl Emitter for TopicsEmitter {
    type Emitted = TopicsSnapshot;

    /// Spawn a new async task to run the business logic of this struct.
    ///
    /// When this emitter gets spawned, it returns a [`mpsc::Receiver`] for [`TopicsSnapshot`],
    /// and a [`JoinHandle`] to help join on the task spawned internally.
    /// The task concludes (joins) only ones the inner task of the emitter terminates.
    ///
    /// # Arguments
    ///
    /// * `shutdown_token`: A [`CancellationToken`] that, when cancelled, will make the internal loop terminate.
    ///
    fn spawn(
        &self,
        shutdown_token: CancellationToken,
    ) -> (mpsc::Receiver<Self::Emitted>, JoinHandle<()>) {
        let (sx, rx) = mpsc::channel::<Self::Emitted>(CHANNEL_SIZE);

        let admin_client = self.admin_client.clone();
        let filter = self.filter.clone();
        let fetch_interval = self.fetch_interval;
        let fetch_timeout = self.fetch_timeout;
        let once = self.once;

        let join_handle = tokio::spawn(async move {
            let mut interval = interval(fetch_interval);
            // First tick completes immediately: consume it, so emissions are `fetch_interval` apart
            interval.tick().await;

            loop {
                let res_snapshot = match Self::fetch_snapshot(&admin_client, &filter, fetch_timeout) {
                    Ok(snapshot) => Some(snapshot),
                    Err(e) => {
                        error!("Failed to fetch cluster metadata: {e}");
                        None
                    },
                };

                match res_snapshot {
                    Some(snapshot) => {
                        debug!(
                            "Fetched {} topics ({} failed to aggregate)",
                            snapshot.topics.len(),
                            snapshot.failed.len()
                        );

                        if once {
                            if let Err(e) = Self::emit(&sx, snapshot).await {
                                error!("Failed to emit {}: {e}", std::any::type_name::<TopicsSnapshot>());
                            }
                            break;
                        }

                        tokio::select! {
                            res = Self::emit_with_interval(&sx, snapshot, &mut interval) => {
                                if let Err(e) = res {
                                    error!("Failed to emit {}: {e}", std::any::type_name::<TopicsSnapshot>());
                                    break;
                                }
                            },
                            _ = shutdown_token.cancelled() => {
                                info!("Shutting down");
                                break;
                            },
                        }
                    },
                    None if once => break,
                    None => {
                        // Wait for next "tick", or get interrupted by shutdown
                        tokio::select! {
                            _ = interval.tick() => {},
                            _ = shutdown_token.cancelled() => {
                                info!("Shutting down");
                                break;
                            },
                        }
                    },
                }
            }
        });

        (rx, join_handle)
    }
}

#[cfg(test)]
mod test {
    use rdkafka::ClientConfig;

    use super::*;
    use crate::kafka_types::PartitionDescription;

    fn build_description(name: &str, partitions: i32) -> TopicDescription {
        TopicDescription {
            name: name.to_string(),
            internal: false,
            partitions: (0..partitions)
                .map(|id| PartitionDescription {
                    id,
                    ..Default::default()
                })
                .collect(),
        }
    }

    fn build_offsets(partitions: &[i32]) -> Vec<PartitionOffsets> {
        partitions
            .iter()
            .map(|p| PartitionOffsets {
                partition: *p,
                first_offset: 0,
                last_offset: 100,
            })
            .collect()
    }

    #[test]
    fn aggregate_isolates_failures() {
        let descriptions = vec![build_description("orders", 2), build_description("payments", 3)];
        let offsets = HashMap::from([
            ("orders".to_string(), build_offsets(&[0, 1])),
            ("payments".to_string(), build_offsets(&[0, 1])),
        ]);

        let (topics, failed) = aggregate(&descriptions, &[], &[], &offsets);

        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].name(), "orders");
        assert_eq!(topics[0].size(), 200);
        assert_eq!(
            failed,
            vec![("payments".to_string(), TopicError::MissingOffsets("payments".to_string(), 2))]
        );
    }

    #[test]
    fn aggregate_log_dirs_of_own_topic() {
        let descriptions = vec![build_description("orders", 1), build_description("payments", 1)];
        let offsets = HashMap::from([
            ("orders".to_string(), build_offsets(&[0])),
            ("payments".to_string(), build_offsets(&[0])),
        ]);
        let log_dirs = vec![
            LogDir {
                topic: "orders".to_string(),
                partition: 0,
                size: 1024,
                ..Default::default()
            },
            LogDir {
                topic: "payments".to_string(),
                partition: 0,
                size: 10,
                ..Default::default()
            },
        ];

        let (topics, failed) = aggregate(&descriptions, &[], &log_dirs, &offsets);

        assert!(failed.is_empty());
        assert_eq!(topics[0].log_dir_size(), 1024);
        assert_eq!(topics[1].log_dir_size(), 10);
    }

    #[test]
    fn aggregate_without_offsets() {
        let descriptions = vec![build_description("orders", 1), build_description("empty", 0)];

        let (topics, failed) = aggregate(&descriptions, &[], &[], &HashMap::new());

        assert_eq!(topics.iter().map(|t| t.name()).collect::<Vec<_>>(), vec!["empty"]);
        assert_eq!(failed.len(), 1);
    }

    #[tokio::test]
    async fn once_stops_after_failed_fetch() {
        // Nothing listens on this port: fetching metadata times out
        let admin_client: AdminClient<DefaultClientContext> = ClientConfig::new()
            .set("bootstrap.servers", "127.0.0.1:1")
            .create()
            .unwrap();

        let emitter = TopicsEmitter::new(
            Arc::new(admin_client),
            TopicFilter::default(),
            Duration::from_secs(60),
            Duration::from_millis(200),
            true,
        );
        let (mut rx, join) = emitter.spawn(CancellationToken::new());

        let res = tokio::time::timeout(Duration::from_secs(10), rx.recv()).await;
        assert!(matches!(res, Ok(None)));
        assert!(join.await.is_ok());
    }
}
