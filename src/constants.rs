use const_format::formatcp;

/// Kafka internal topics: they are managed by the Brokers themselves.
pub(crate) const INTERNAL_TOPICS: [&str; 2] = ["__consumer_offsets", "__transaction_state"];

/// Name of the configuration that controls the retention strategy of a Topic.
pub(crate) const CLEANUP_POLICY_CONFIG: &str = "cleanup.policy";

/// Value of [`CLEANUP_POLICY_CONFIG`] that makes a Topic compacted.
pub(crate) const CLEANUP_POLICY_COMPACT: &str = "compact";

/// Identifier used when `cluster.id` is not set on Brokers.
pub(crate) const DEFAULT_CLUSTER_ID: &str = "__none__";

pub(crate) const DEFAULT_FETCH_INTERVAL_SECS: u64 = 60;
pub(crate) const DEFAULT_FETCH_INTERVAL: &str = formatcp!("{}", DEFAULT_FETCH_INTERVAL_SECS);

pub(crate) const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub(crate) const DEFAULT_FETCH_TIMEOUT: &str = formatcp!("{}", DEFAULT_FETCH_TIMEOUT_SECS);

/// Environment variable that overrides the logging verbosity set via command line.
pub(crate) const LOG_ENV_VAR: &str = "TOPICSCOPE_LOG";
