use rdkafka::metadata::MetadataBroker;

/// A Broker of the Kafka Cluster.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Node {
    pub id: i32,
    pub host: String,
    pub port: u16,
    pub rack: Option<String>,
}

impl Node {
    /// A [`Node`] known only by its identifier.
    ///
    /// Used when a Partition references a Broker that is not (or no longer) part of the Cluster metadata.
    pub fn unknown(id: i32) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }
}

impl From<&MetadataBroker> for Node {
    fn from(b: &MetadataBroker) -> Self {
        Node {
            id: b.id(),
            host: b.host().to_owned(),
            port: b.port() as u16,
            rack: None,
        }
    }
}

/// The role a [`Node`] plays for a specific Partition: it holds one of its replicas.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct PartitionReplica {
    pub node: Node,

    /// `true` if this replica is the Partition leader
    pub leader: bool,

    /// `true` if this replica is part of the in-sync replica set (ISR)
    pub in_sync: bool,
}

impl PartitionReplica {
    pub fn id(&self) -> i32 {
        self.node.id
    }

    pub fn is_leader(&self) -> bool {
        self.leader
    }

    pub fn is_in_sync_replica(&self) -> bool {
        self.in_sync
    }
}
