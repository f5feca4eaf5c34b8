use clap::{ArgGroup, Parser};
use rdkafka::ClientConfig;
use regex::Regex;
use tokio::time::Duration;

use crate::constants::{DEFAULT_FETCH_INTERVAL, DEFAULT_FETCH_TIMEOUT};
use crate::topics_emitter::TopicFilter;

/// Command Line Interface, defined via the declarative,
/// `derive` based functionality of the `clap` crate.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("logging_flags")
        .required(false)
        .multiple(false)
        .args(["verbose", "quiet"]),
))]
pub struct Cli {
    // ------------------------------------------------------------------ Admin Client configuration
    /// Initial Kafka Brokers to connect to (format: 'HOST:PORT,...').
    ///
    /// Equivalent to '--kafka-conf=bootstrap.servers:host:port,...'.
    #[arg(short, long = "brokers", value_name = "BOOTSTRAP_BROKERS")]
    pub bootstrap_brokers: String,

    /// Client identifier used by the internal Kafka (Admin) Client.
    ///
    /// Equivalent to '--kafka-conf=client.id:my-client-id'.
    #[arg(long = "client-id", value_name = "CLIENT_ID", default_value = env!("CARGO_PKG_NAME"))]
    pub client_id: String,

    /// Additional configuration used by the internal Kafka (Admin) Client (format: 'CONF_KEY:CONF_VAL').
    ///
    /// To set multiple configurations keys, use this argument multiple times.
    /// See: https://github.com/edenhill/librdkafka/blob/master/CONFIGURATION.md.
    #[arg(
        long = "kafka-conf",
        value_name = "CONF_KEY:CONF_VAL",
        value_parser = kv_clap_value_parser,
        verbatim_doc_comment
    )]
    pub kafka_config: Vec<KVPair>,

    // ------------------------------------------------------------------ Topics selection
    /// Only inspect Topics whose name matches this regular expression.
    ///
    /// Use this argument multiple times to select more Topics.
    /// If omitted, all Topics are selected.
    #[arg(short, long = "topic", value_name = "REGEX", value_parser = regex_clap_value_parser)]
    pub topics: Vec<Regex>,

    /// Skip Topics whose name matches this regular expression.
    ///
    /// Use this argument multiple times to exclude more Topics.
    #[arg(short = 'x', long = "exclude", value_name = "REGEX", value_parser = regex_clap_value_parser)]
    pub exclude: Vec<Regex>,

    /// Inspect also the Topics used internally by Kafka (e.g. '__consumer_offsets').
    #[arg(long)]
    pub internal: bool,

    // ------------------------------------------------------------------ Fetching
    /// How often (seconds) to fetch Topics from the Cluster and report them.
    #[arg(
        long = "interval",
        value_name = "SECONDS",
        default_value = DEFAULT_FETCH_INTERVAL,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub fetch_interval: u64,

    /// How long (seconds) to wait for the Cluster to respond to each request.
    #[arg(
        long = "timeout",
        value_name = "SECONDS",
        default_value = DEFAULT_FETCH_TIMEOUT,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub fetch_timeout: u64,

    /// Report once, then exit.
    #[arg(long)]
    pub once: bool,

    /// Verbose logging.
    ///
    /// * none    = 'WARN'
    /// * '-v'    = 'INFO'
    /// * '-vv'   = 'DEBUG'
    /// * '-vvv'  = 'TRACE'
    ///
    /// Alternatively, set environment variable 'TOPICSCOPE_LOG=(ERROR|WARN|INFO|DEBUG|TRACE|OFF)'.
    #[arg(short, long, action = clap::ArgAction::Count, verbatim_doc_comment)]
    pub verbose: u8,

    /// Quiet logging.
    ///
    /// * none    = 'WARN'
    /// * '-q'    = 'ERROR'
    /// * '-qq'   = 'OFF'
    ///
    /// Alternatively, set environment variable 'TOPICSCOPE_LOG=(ERROR|WARN|INFO|DEBUG|TRACE|OFF)'.
    #[arg(short, long, action = clap::ArgAction::Count, verbatim_doc_comment)]
    pub quiet: u8,
}

impl Cli {
    pub fn parse_and_validate() -> Self {
        Self::parse()
    }

    pub fn verbosity_level(&self) -> i8 {
        self.verbose as i8 - self.quiet as i8
    }

    pub fn fetch_interval(&self) -> Duration {
        Duration::from_secs(self.fetch_interval)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }

    pub fn topic_filter(&self) -> TopicFilter {
        TopicFilter {
            include: self.topics.clone(),
            exclude: self.exclude.clone(),
            include_internal: self.internal,
        }
    }

    pub fn build_client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new();
        config
            .set("bootstrap.servers", self.bootstrap_brokers.clone())
            .set("client.id", self.client_id.clone());
        for cfg in &self.kafka_config {
            config.set(cfg.0.clone(), cfg.1.clone());
        }

        trace!("Created:\n{:#?}", config);
        config
    }
}

/// A simple (key,value) pair of `String`s, useful to be parsed from arguments via [`kv_clap_value_parser`].
pub type KVPair = (String, String);

/// To be used as [`clap::value_parser`] function to create [`KVPair`] values.
fn kv_clap_value_parser(kv: &str) -> Result<KVPair, String> {
    let (k, v) = match kv.split_once(':') {
        None => {
            return Err("Should have 'K:V' format".to_string());
        },
        Some((k, v)) => (k, v),
    };

    Ok((k.to_string(), v.to_string()))
}

fn regex_clap_value_parser(re_str: &str) -> Result<Regex, String> {
    Regex::new(re_str).map_err(|e| format!("Invalid regular expression '{re_str}': {e}"))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn kv_parser() {
        assert_eq!(
            kv_clap_value_parser("security.protocol:SASL_SSL"),
            Ok(("security.protocol".to_string(), "SASL_SSL".to_string()))
        );
        assert_eq!(
            kv_clap_value_parser("bootstrap.servers:host:9092"),
            Ok(("bootstrap.servers".to_string(), "host:9092".to_string()))
        );
        assert!(kv_clap_value_parser("security.protocol").is_err());
    }

    #[test]
    fn regex_parser() {
        assert!(regex_clap_value_parser("^orders-.*$").is_ok());
        assert!(regex_clap_value_parser("orders-(").is_err());
    }

    #[test]
    fn parse_args() {
        let cli = Cli::try_parse_from([
            "topicscope",
            "-b",
            "localhost:9092",
            "--kafka-conf",
            "security.protocol:SSL",
            "-t",
            "^orders",
            "-x",
            "dlq$",
            "--once",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.bootstrap_brokers, "localhost:9092");
        assert_eq!(cli.client_id, "topicscope");
        assert_eq!(cli.verbosity_level(), 2);
        assert_eq!(cli.fetch_interval(), Duration::from_secs(60));
        assert_eq!(cli.fetch_timeout(), Duration::from_secs(10));
        assert!(cli.once);

        let filter = cli.topic_filter();
        assert!(filter.matches("orders"));
        assert!(!filter.matches("orders-dlq"));
        assert!(!filter.matches("__consumer_offsets"));

        let config = cli.build_client_config();
        assert_eq!(config.get("bootstrap.servers"), Some("localhost:9092"));
        assert_eq!(config.get("security.protocol"), Some("SSL"));
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["topicscope", "-b", "localhost:9092", "-v", "-q"]).is_err());
    }

    #[test]
    fn zero_interval_or_timeout_rejected() {
        assert!(Cli::try_parse_from(["topicscope", "-b", "localhost:9092", "--interval", "0"]).is_err());
        assert!(Cli::try_parse_from(["topicscope", "-b", "localhost:9092", "--timeout", "0"]).is_err());

        let cli =
            Cli::try_parse_from(["topicscope", "-b", "localhost:9092", "--interval", "1", "--timeout", "1"]).unwrap();
        assert_eq!(cli.fetch_interval(), Duration::from_secs(1));
        assert_eq!(cli.fetch_timeout(), Duration::from_secs(1));
    }
}
