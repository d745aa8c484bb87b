use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::config::config_model::AppSettings;
use crate::metrics::collector::InstanceCollector;

#[async_trait]
pub trait CollectorScheduler {
    async fn run_collection_loop(&self) -> anyhow::Result<()>;
}

pub struct CollectorSchedulerImpl {
    collector: Arc<dyn InstanceCollector>,
    configs: &'static AppSettings,
}

impl CollectorSchedulerImpl {
    pub fn new(collector: Arc<dyn InstanceCollector>, configs: &'static AppSettings) -> Self {
        Self { collector, configs }
    }
}

#[async_trait]
impl CollectorScheduler for CollectorSchedulerImpl {
    /// Runs cycles strictly one after another, sleeping the configured interval
    /// between the end of one cycle and the start of the next. Never returns;
    /// a failed cycle is logged and retried on the next tick.
    async fn run_collection_loop(&self) -> anyhow::Result<()> {
        info!("Starting collection loop");

        let mut first = true;
        loop {
            if !first {
                tokio::time::sleep(self.configs.collector.interval).await;
            }
            first = false;

            match self.collector.collect_once().await {
                Ok(summary) => {
                    info!(
                        "Cycle finished: {} emitted, {} failed, {} skipped",
                        summary.emitted, summary.failed, summary.skipped
                    );
                }
                Err(e) => {
                    error!("Collection cycle failed with err {e}");
                    continue;
                }
            }
        }
    }
}
