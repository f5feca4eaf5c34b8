// Inner modules
mod emitter;
mod filter;
mod groups;

use std::sync::Arc;

use rdkafka::{admin::AdminClient, client::DefaultClientContext};
use tokio::sync::mpsc::Receiver;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::internals::Emitter;

// Exports
pub use emitter::{TopicsEmitter, TopicsSnapshot};
pub use filter::TopicFilter;

pub fn init(
    admin_client: Arc<AdminClient<DefaultClientContext>>,
    filter: TopicFilter,
    fetch_interval: Duration,
    fetch_timeout: Duration,
    once: bool,
    shutdown_token: CancellationToken,
) -> (Receiver<TopicsSnapshot>, JoinHandle<()>) {
    let topics_emitter = TopicsEmitter::new(admin_client, filter, fetch_interval, fetch_timeout, once);
    let (ts_rx, ts_join) = topics_emitter.spawn(shutdown_token);

    debug!("Initialized");
    (ts_rx, ts_join)
}
