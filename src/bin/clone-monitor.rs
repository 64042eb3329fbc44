use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

use clone_monitor::args::Args;
use clone_monitor::runtime::{RuntimeConfig, shutdown_signal};
use clone_monitor::{Config, Monitor, MongoSource, http, load_or_create_config, logging};

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_logging(args.log_file.as_deref());

    let config = load_or_create_config(&args.config)?;

    let rt = RuntimeConfig::from_args(args.threads).build_runtime()?;
    rt.block_on(run(args, config))
}

async fn run(args: Args, config: Config) -> Result<()> {
    info!(
        "Monitoring database '{}' at {}",
        config.source.database,
        config.source.uri()
    );

    let source = MongoSource::connect(&config.source)
        .await
        .context("Failed to set up document store client")?;
    let monitor = Arc::new(Monitor::with_source(source, &config.monitor));

    monitor.clone().spawn_poller(config.monitor.poll_interval);

    let listen_addr = args.listen_addr(&config.server);
    http::serve(monitor, &listen_addr, shutdown_signal()).await?;

    info!("Monitor stopped");
    Ok(())
}
