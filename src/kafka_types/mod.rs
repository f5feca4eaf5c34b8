mod group;
mod log_dir;
mod node;
mod partition;
mod topic;
mod topic_partition;

pub use group::{Group, GroupWithMembers, Member, MemberWithAssignment};
pub use log_dir::LogDir;
pub use node::{Node, PartitionReplica};
pub use partition::{Partition, PartitionOffsets};
pub use topic::{is_internal, PartitionDescription, TopicDescription};
pub use topic_partition::TopicPartition;
