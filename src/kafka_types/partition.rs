use crate::kafka_types::{LogDir, PartitionDescription, PartitionReplica};

/// Earliest and latest offsets of a Topic Partition.
///
/// `first_offset` is the earliest retained offset, `last_offset` the next one to be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct PartitionOffsets {
    pub partition: i32,
    pub first_offset: i64,
    pub last_offset: i64,
}

/// A Topic Partition, with its replicas, log directories and offsets.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Partition {
    pub topic: String,
    pub id: i32,

    /// Replicas, in the order they are assigned to the Partition
    pub nodes: Vec<PartitionReplica>,

    pub log_dirs: Vec<LogDir>,
    pub first_offset: i64,
    pub last_offset: i64,
}

impl Partition {
    /// Creates a new [`Partition`].
    ///
    /// # Arguments
    ///
    /// * `topic` - Topic the Partition belongs to
    /// * `description` - Layout of the Partition: leader, replicas and ISR
    /// * `log_dirs` - Log directories hosting replicas of this Partition (can be empty)
    /// * `offsets` - Earliest and latest offsets of this Partition
    pub fn new(
        topic: &str,
        description: &PartitionDescription,
        log_dirs: Vec<LogDir>,
        offsets: &PartitionOffsets,
    ) -> Self {
        let leader_id = description.leader.as_ref().map(|l| l.id);

        Partition {
            topic: topic.to_owned(),
            id: description.id,
            nodes: description
                .replicas
                .iter()
                .map(|n| PartitionReplica {
                    node: n.clone(),
                    leader: leader_id == Some(n.id),
                    in_sync: description.isr.iter().any(|isr| isr.id == n.id),
                })
                .collect(),
            log_dirs,
            first_offset: offsets.first_offset,
            last_offset: offsets.last_offset,
        }
    }

    pub fn leader(&self) -> Option<&PartitionReplica> {
        self.nodes.iter().find(|n| n.is_leader())
    }

    pub fn replicas(&self) -> &[PartitionReplica] {
        &self.nodes
    }

    pub fn in_sync_replicas(&self) -> impl Iterator<Item = &PartitionReplica> {
        self.nodes.iter().filter(|n| n.is_in_sync_replica())
    }

    pub fn is_under_replicated(&self) -> bool {
        self.in_sync_replicas().count() < self.nodes.len()
    }

    /// Sum of the sizes (bytes) of the log directories hosting this Partition.
    pub fn log_dir_size(&self) -> u64 {
        self.log_dirs.iter().map(|ld| ld.size).sum()
    }

    /// Amount of records retained by this Partition (approximate).
    ///
    /// Offsets are reported by the Brokers as-is: a nonsensical pair wraps around instead of panicking.
    pub fn size(&self) -> i64 {
        self.last_offset.wrapping_sub(self.first_offset)
    }
}
