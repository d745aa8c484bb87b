mod client;
mod config;
mod metrics;

use std::sync::Arc;

use tracing::info;
use tracing::metadata::LevelFilter;

use crate::client::amp_client::AmpClientImpl;
use crate::config::config_model::AppSettings;
use crate::metrics::collector::InstanceCollectorImpl;
use crate::metrics::collector_scheduler::{CollectorScheduler, CollectorSchedulerImpl};
use crate::metrics::point_writer::InfluxPointWriterImpl;

// because it breaks debugger =(
#[cfg(not(debug_assertions))]
#[global_allocator]
static GLOBAL_MIMALLOC: mimalloc_rust::GlobalMiMalloc = mimalloc_rust::GlobalMiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (non_blocking, _guard) = tracing_appender::non_blocking(std::io::stdout());

    tracing_subscriber::fmt()
        .json()
        .with_max_level(LevelFilter::INFO)
        .with_writer(non_blocking)
        .init();

    let config_path =
        std::env::var("AMPFLUX_CONFIG").unwrap_or_else(|_| "./config.yml".to_string());
    let configs = config::parse::parse_configs(config_path)?;
    let configs: &'static AppSettings = Box::leak(Box::new(configs));

    let scheduler = build_app(configs);

    info!("Starting collector");
    scheduler.run_collection_loop().await?;

    Ok(())
}

fn build_app(configs: &'static AppSettings) -> CollectorSchedulerImpl {
    let client = AmpClientImpl::new(configs, reqwest::Client::new());
    let writer = InfluxPointWriterImpl::new(configs);
    let collector = InstanceCollectorImpl::new(Arc::new(client), Arc::new(writer), configs);
    CollectorSchedulerImpl::new(Arc::new(collector), configs)
}
