use std::fmt;

use crate::config_repository::ConfigRepository;
use crate::kafka_types::Partition;
use crate::topic::{Topic, TopicResult};

/// Summary of a single Partition of a [`Topic`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionReport {
    pub id: i32,
    pub leader: Option<i32>,
    pub replicas: Vec<i32>,
    pub in_sync_replicas: Vec<i32>,
    pub under_replicated: bool,
    pub first_offset: i64,
    pub last_offset: i64,
    pub size: i64,
    pub log_dir_size: u64,
}

impl PartitionReport {
    /// Build the [`PartitionReport`] of a Partition of `topic`.
    ///
    /// Fails with [`crate::topic::TopicError::UnknownPartition`] if `p` is not one of the Partitions of `topic`.
    pub fn build(topic: &Topic, p: &Partition) -> TopicResult<Self> {
        Ok(PartitionReport {
            id: p.id,
            leader: p.leader().map(|l| l.id()),
            replicas: p.replicas().iter().map(|r| r.id()).collect(),
            in_sync_replicas: p.in_sync_replicas().map(|r| r.id()).collect(),
            under_replicated: p.is_under_replicated(),
            first_offset: p.first_offset,
            last_offset: p.last_offset,
            size: topic.partition_size(p.id)?,
            log_dir_size: p.log_dir_size(),
        })
    }
}

/// Summary of a [`Topic`]: all its derived values, collected once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicReport {
    pub name: String,
    pub internal: bool,
    pub partitions: Vec<PartitionReport>,
    pub replicas: Vec<i32>,
    pub in_sync_replicas: Vec<i32>,
    pub consumer_groups: Vec<String>,
    pub log_dirs: usize,
    pub log_dir_size: u64,
    pub size: i64,

    /// Error message, if it was not possible to determine if records can be deleted
    pub can_delete_records: Result<bool, String>,
}

impl TopicReport {
    /// Build the [`TopicReport`] of a [`Topic`].
    ///
    /// The `config_repository` is used to determine if records can be deleted from the Topic:
    /// a failure is reported as such, and never replaced with a default.
    pub async fn build<R>(topic: &Topic, config_repository: &R) -> TopicResult<Self>
    where
        R: ConfigRepository + ?Sized,
    {
        let can_delete_records = topic.can_delete_records(config_repository).await.map_err(|e| {
            warn!("Unable to determine if records of Topic '{}' can be deleted: {e}", topic.name());
            e.to_string()
        });

        let mut consumer_groups: Vec<String> =
            topic.consumer_groups().iter().map(|g| g.name().to_string()).collect();
        consumer_groups.sort();

        let partitions = topic
            .partitions()
            .iter()
            .map(|p| PartitionReport::build(topic, p))
            .collect::<TopicResult<Vec<_>>>()?;

        Ok(TopicReport {
            name: topic.name().to_string(),
            internal: topic.is_internal(),
            partitions,
            replicas: topic.replicas().iter().map(|n| n.id).collect(),
            in_sync_replicas: topic.in_sync_replicas().iter().map(|n| n.id).collect(),
            consumer_groups,
            log_dirs: topic.log_dirs().len(),
            log_dir_size: topic.log_dir_size(),
            size: topic.size(),
            can_delete_records,
        })
    }
}

fn join_ids(ids: &[i32]) -> String {
    ids.iter().map(i32::to_string).collect::<Vec<_>>().join(",")
}

impl fmt::Display for TopicReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Topic: {}{}", self.name, if self.internal { " (internal)" } else { "" })?;
        writeln!(f, "  Partitions:         {}", self.partitions.len())?;
        writeln!(f, "  Replicas:           [{}]", join_ids(&self.replicas))?;
        writeln!(f, "  In-sync replicas:   [{}]", join_ids(&self.in_sync_replicas))?;
        writeln!(f, "  Records (approx.):  {}", self.size)?;
        writeln!(f, "  Size on disk:       {} bytes ({} log dirs)", self.log_dir_size, self.log_dirs)?;
        writeln!(f, "  Consumer groups:    [{}]", self.consumer_groups.join(","))?;
        match &self.can_delete_records {
            Ok(deletable) => writeln!(f, "  Records deletable:  {deletable}")?,
            Err(e) => writeln!(f, "  Records deletable:  unknown ({e})")?,
        }

        for p in &self.partitions {
            writeln!(
                f,
                "    #{:<4} leader={:<6} replicas=[{}] isr=[{}]{} offsets={}..{} records={} size={}",
                p.id,
                p.leader.map(|l| l.to_string()).unwrap_or_else(|| "none".to_string()),
                join_ids(&p.replicas),
                join_ids(&p.in_sync_replicas),
                if p.under_replicated { " (under-replicated)" } else { "" },
                p.first_offset,
                p.last_offset,
                p.size,
                p.log_dir_size,
            )?;
        }

        Ok(())
    }
}
