#[macro_use]
extern crate log;

mod cli;
mod config_repository;
mod constants;
mod internals;
mod kafka_types;
mod logging;
mod report;
mod topic;
mod topics_emitter;

use std::error::Error;
use std::sync::Arc;

use rdkafka::{admin::AdminClient, client::DefaultClientContext};
use tokio_util::sync::CancellationToken;

use cli::Cli;
use config_repository::AdminConfigRepository;
use report::TopicReport;
use topics_emitter::TopicsSnapshot;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = parse_cli_and_init_logging();

    let shutdown_token = build_shutdown_token();

    let admin_client: AdminClient<DefaultClientContext> = match cli.build_client_config().create() {
        Ok(ac) => ac,
        Err(e) => {
            error!("Failed to allocate Admin Client: {e}");
            std::process::exit(exit_code::CONFIG_ERROR);
        },
    };
    let admin_client = Arc::new(admin_client);

    let config_repository =
        AdminConfigRepository::new(admin_client.clone(), cli.fetch_timeout(), shutdown_token.clone());

    let (mut ts_rx, ts_join) = topics_emitter::init(
        admin_client,
        cli.topic_filter(),
        cli.fetch_interval(),
        cli.fetch_timeout(),
        cli.once,
        shutdown_token.clone(),
    );

    let mut reported = false;
    while let Some(snapshot) = ts_rx.recv().await {
        print_snapshot(&snapshot, &config_repository).await;
        reported = true;

        if cli.once {
            shutdown_token.cancel();
            break;
        }
    }

    // Dropping the receiver unblocks the emitter, in case it's waiting to emit
    drop(ts_rx);
    ts_join.await?;

    if cli.once && !reported {
        error!("Unable to fetch Topics from the Cluster");
        std::process::exit(exit_code::SERVICE_UNAVAILABLE);
    }

    info!("Shutdown complete");
    Ok(())
}

fn parse_cli_and_init_logging() -> Cli {
    // Parse command line input and initialize logging
    let cli = Cli::parse_and_validate();
    logging::init(cli.verbosity_level());

    trace!("Created:\n{:#?}", cli);

    cli
}

fn build_shutdown_token() -> CancellationToken {
    let shutdown_token = CancellationToken::new();

    // Setup shutdown signal handler:
    // when it's time to shutdown, cancel the token shared with the rest of the system.
    //
    // NOTE: This handler will be listening on its own dedicated thread.
    let handler_token = shutdown_token.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Shutting down...");
        handler_token.cancel();
    }) {
        error!("Failed to register signal handler: {e}");
    }

    shutdown_token
}

async fn print_snapshot(snapshot: &TopicsSnapshot, config_repository: &AdminConfigRepository) {
    println!(
        "# Cluster '{}': {} topics at {}\n",
        snapshot.cluster_id,
        snapshot.topics.len() + snapshot.failed.len(),
        snapshot.collected_at.to_rfc3339()
    );

    for t in &snapshot.topics {
        match TopicReport::build(t, config_repository).await {
            Ok(report) => println!("{report}"),
            Err(e) => {
                error!("Unable to build report of Topic '{}': {e}", t.name());
                println!("Topic: {}\n  Unable to report: {e}\n", t.name());
            },
        }
    }

    for (name, e) in &snapshot.failed {
        println!("Topic: {name}\n  Unable to aggregate: {e}\n");
    }
}
