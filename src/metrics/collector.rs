use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::client::amp_client::{AmpClient, AuthError, EnumerationError};
use crate::config::config_model::AppSettings;
use crate::metrics::instance_model::HostGroup;
use crate::metrics::point_writer::PointWriter;

/// A cycle aborts only on the shared steps; per-instance write failures are
/// counted and logged in place.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),
    #[error("instance enumeration failed: {0}")]
    Enumeration(#[from] EnumerationError),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleSummary {
    pub emitted: usize,
    pub failed: usize,
    pub skipped: usize,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InstanceCollector: Send + Sync {
    async fn collect_once(&self) -> Result<CycleSummary, CollectError>;
}

pub struct InstanceCollectorImpl {
    client: Arc<dyn AmpClient>,
    writer: Arc<dyn PointWriter>,
    configs: &'static AppSettings,
}

impl InstanceCollectorImpl {
    pub fn new(
        client: Arc<dyn AmpClient>,
        writer: Arc<dyn PointWriter>,
        configs: &'static AppSettings,
    ) -> Self {
        Self {
            client,
            writer,
            configs,
        }
    }
}

#[async_trait]
impl InstanceCollector for InstanceCollectorImpl {
    async fn collect_once(&self) -> Result<CycleSummary, CollectError> {
        info!("Updating instances");

        // fresh session every cycle, dropped with the rest of the cycle state
        let session = self.client.login().await?;
        let listing = self.client.list_instances(&session).await?;
        let groups: Vec<HostGroup> = listing.result.into_iter().map(HostGroup::from).collect();

        let mut summary = CycleSummary::default();
        for group in &groups {
            info!("Collecting instances of host {}", group.friendly_name);

            for instance in &group.instances {
                // the controller instance is the management plane, not a workload
                if instance.instance_name == self.configs.amp.controller_name {
                    summary.skipped += 1;
                    continue;
                }
                match self.writer.write_instance(instance).await {
                    Ok(()) => summary.emitted += 1,
                    Err(e) => {
                        error!(
                            "Point write for {} failed with err {e}",
                            instance.instance_name
                        );
                        summary.failed += 1;
                    }
                }
            }
        }
        Ok(summary)
    }
}
