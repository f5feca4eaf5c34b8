/// On-disk footprint of one replica of a Topic Partition, as reported by the Broker that hosts it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct LogDir {
    /// Broker hosting the log directory
    pub broker_id: i32,

    /// Absolute path of the log directory on the Broker
    pub path: String,

    pub topic: String,
    pub partition: i32,

    /// Size (bytes) of the Partition replica
    pub size: u64,

    /// Lag of this replica, compared to the Partition high-watermark
    pub offset_lag: i64,

    /// `true` if this is a "future" replica, still being moved to this log directory
    pub is_future: bool,
}
