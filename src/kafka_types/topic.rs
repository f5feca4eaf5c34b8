use rdkafka::metadata::{MetadataPartition, MetadataTopic};

use super::node::Node;
use crate::constants::INTERNAL_TOPICS;

/// Layout of a Topic, as described by the Kafka Cluster metadata.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct TopicDescription {
    pub name: String,
    pub internal: bool,
    pub partitions: Vec<PartitionDescription>,
}

impl TopicDescription {
    /// Creates a [`TopicDescription`] from [`MetadataTopic`].
    ///
    /// Broker identifiers are resolved against `brokers`: the ones that can't be found
    /// become [`Node::unknown`].
    ///
    /// # Arguments
    ///
    /// * `t` - Topic metadata, as returned by the Cluster
    /// * `brokers` - Brokers currently part of the Cluster
    pub fn from_metadata(t: &MetadataTopic, brokers: &[Node]) -> Self {
        TopicDescription {
            name: t.name().to_owned(),
            internal: is_internal(t.name()),
            partitions: t
                .partitions()
                .iter()
                .map(|p| PartitionDescription::from_metadata(p, brokers))
                .collect(),
        }
    }
}

/// Returns `true` if the Topic is one of those used internally by Kafka.
pub fn is_internal(topic: &str) -> bool {
    INTERNAL_TOPICS.contains(&topic)
}

/// Layout of a Partition: its leader, replicas and in-sync replicas (ISR).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct PartitionDescription {
    pub id: i32,
    pub leader: Option<Node>,
    pub replicas: Vec<Node>,
    pub isr: Vec<Node>,
}

impl PartitionDescription {
    fn from_metadata(p: &MetadataPartition, brokers: &[Node]) -> Self {
        let resolve = |id: &i32| {
            brokers.iter().find(|b| b.id == *id).cloned().unwrap_or_else(|| Node::unknown(*id))
        };

        PartitionDescription {
            id: p.id(),
            // Leader is `-1` when the Partition has no leader
            leader: if p.leader() < 0 {
                None
            } else {
                Some(resolve(&p.leader()))
            },
            replicas: p.replicas().iter().map(resolve).collect(),
            isr: p.isr().iter().map(resolve).collect(),
        }
    }
}
