use konsumer_offsets::TopicPartitions;

/// Represents a single Topic-Partition pair
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct TopicPartition {
    pub topic: String,
    pub partition: i32,
}

impl TopicPartition {
    pub(crate) fn new(topic: String, partition: i32) -> Self {
        Self {
            topic,
            partition,
        }
    }

    /// Expands a [`TopicPartitions`], as found in a Consumer Group member assignment,
    /// into one [`TopicPartition`] per Partition.
    pub(crate) fn vec_from(tps: TopicPartitions) -> Vec<Self> {
        tps.partitions.into_iter().map(|p| Self::new(tps.topic.clone(), p)).collect()
    }
}
