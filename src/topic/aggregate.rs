use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use super::errors::{TopicError, TopicResult};
use crate::config_repository::ConfigRepository;
use crate::constants::{CLEANUP_POLICY_COMPACT, CLEANUP_POLICY_CONFIG};
use crate::kafka_types::{
    GroupWithMembers, LogDir, Node, Partition, PartitionOffsets, TopicDescription,
};

/// A Topic, aggregating the state of all its Partitions and the Consumer Groups that consume it.
///
/// It's built once, from data already fetched from the Cluster, and it's immutable afterwards.
/// All the derived values (sizes, replicas, ...) are computed every time they are requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    name: String,
    internal: bool,

    /// Partitions, in the same order of the Topic layout
    partitions: Vec<Partition>,

    consumer_groups: Vec<Arc<GroupWithMembers>>,
}

impl Topic {
    /// Creates a new [`Topic`], joining every Partition of the `description`
    /// with its own log directories and offsets.
    ///
    /// Log directories and offsets are matched to Partitions by Partition identifier:
    /// the order of the inputs doesn't matter.
    /// A Partition can have no log directories, but it must have offsets:
    /// if it doesn't, [`TopicError::MissingOffsets`] is returned.
    ///
    /// # Arguments
    ///
    /// * `description` - Layout of the Topic
    /// * `consumer_groups` - Consumer Groups bound to the Topic
    /// * `log_dirs` - Log directories hosting Partitions of the Topic, across all Brokers
    /// * `offsets` - Earliest and latest offsets of the Partitions of the Topic
    pub fn new(
        description: &TopicDescription,
        consumer_groups: Vec<Arc<GroupWithMembers>>,
        log_dirs: &[LogDir],
        offsets: &[PartitionOffsets],
    ) -> TopicResult<Self> {
        let mut log_dirs_by_partition: HashMap<i32, Vec<LogDir>> = HashMap::new();
        for ld in log_dirs {
            log_dirs_by_partition.entry(ld.partition).or_default().push(ld.clone());
        }

        let mut offsets_by_partition: HashMap<i32, &PartitionOffsets> =
            HashMap::with_capacity(offsets.len());
        for o in offsets {
            if offsets_by_partition.contains_key(&o.partition) {
                warn!(
                    "Ignoring duplicated offsets for Partition '{}:{}': {:?}",
                    description.name, o.partition, o
                );
                continue;
            }
            offsets_by_partition.insert(o.partition, o);
        }

        let mut partitions = Vec::with_capacity(description.partitions.len());
        for pd in &description.partitions {
            let po = offsets_by_partition
                .get(&pd.id)
                .ok_or_else(|| TopicError::MissingOffsets(description.name.clone(), pd.id))?;

            partitions.push(Partition::new(
                &description.name,
                pd,
                log_dirs_by_partition.remove(&pd.id).unwrap_or_default(),
                po,
            ));
        }

        trace!(
            "Aggregated Topic '{}': {} partitions, {} consumer groups",
            description.name,
            partitions.len(),
            consumer_groups.len()
        );

        Ok(Self {
            name: description.name.clone(),
            internal: description.internal,
            partitions,
            consumer_groups,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `true` if this is a Topic used internally by Kafka.
    pub fn is_internal(&self) -> bool {
        self.internal
    }

    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    pub fn consumer_groups(&self) -> &[Arc<GroupWithMembers>] {
        &self.consumer_groups
    }

    /// Brokers holding at least one replica of the Topic, in the order they are first seen.
    pub fn replicas(&self) -> Vec<&Node> {
        let mut seen = HashSet::new();
        self.partitions
            .iter()
            .flat_map(|p| p.replicas().iter())
            .filter(|r| seen.insert(r.id()))
            .map(|r| &r.node)
            .collect()
    }

    /// Brokers holding at least one in-sync replica of the Topic, in the order they are first seen.
    pub fn in_sync_replicas(&self) -> Vec<&Node> {
        let mut seen = HashSet::new();
        self.partitions
            .iter()
            .flat_map(|p| p.in_sync_replicas())
            .filter(|r| seen.insert(r.id()))
            .map(|r| &r.node)
            .collect()
    }

    /// All the log directories of all the Partitions.
    pub fn log_dirs(&self) -> Vec<&LogDir> {
        self.partitions.iter().flat_map(|p| p.log_dirs.iter()).collect()
    }

    /// Size (bytes) of the Topic on disk, across all Brokers.
    pub fn log_dir_size(&self) -> u64 {
        self.partitions.iter().map(Partition::log_dir_size).sum()
    }

    /// Amount of records retained by the Topic (approximate).
    ///
    /// Wraps around on overflow, like [`Partition::size`].
    pub fn size(&self) -> i64 {
        self.partitions.iter().fold(0i64, |acc, p| acc.wrapping_add(p.size()))
    }

    /// Amount of records retained by a Partition of the Topic (approximate).
    pub fn partition_size(&self, partition: i32) -> TopicResult<i64> {
        self.partitions
            .iter()
            .find(|p| p.id == partition)
            .map(Partition::size)
            .ok_or_else(|| TopicError::UnknownPartition(self.name.clone(), partition))
    }

    /// Returns `true` if individual records can be deleted from the Topic.
    ///
    /// Internal Topics never are. For the others, the Topic configuration is looked up
    /// via `config_repository`: records can be deleted if `cleanup.policy` includes `compact`.
    pub async fn can_delete_records<R>(&self, config_repository: &R) -> TopicResult<bool>
    where
        R: ConfigRepository + ?Sized,
    {
        if self.internal {
            return Ok(false);
        }

        Ok(config_repository
            .find_by_topic(&self.name)
            .await?
            .iter()
            .any(|c| c.value_contains(CLEANUP_POLICY_CONFIG, CLEANUP_POLICY_COMPACT)))
    }
}
