use async_trait::async_trait;
use chrono::Utc;
use url::Url;

use crate::config::config_model::AppSettings;
use crate::metrics::instance_model::InstanceInfo;

#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("sink address is not a valid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("sink write failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("sink rejected point: status {status}: {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PointWriter: Send + Sync {
    async fn write_instance(&self, instance: &InstanceInfo) -> Result<(), EmitError>;
}

/// Writes one line-protocol point per call to the InfluxDB v2 write endpoint.
#[derive(Clone)]
pub struct InfluxPointWriterImpl {
    configs: &'static AppSettings,
}

impl InfluxPointWriterImpl {
    pub fn new(configs: &'static AppSettings) -> Self {
        Self { configs }
    }

    fn write_url(&self) -> Result<Url, url::ParseError> {
        let mut url = {
            let base = self.configs.influx.addr.trim_end_matches('/');
            let str = format!("{base}/api/v2/write");
            Url::parse(str.as_str())?
        };

        url.query_pairs_mut()
            .append_pair("org", self.configs.influx.org.as_str())
            .append_pair("bucket", self.configs.influx.bucket.as_str())
            .append_pair("precision", "ns");
        Ok(url)
    }
}

// line-protocol measurement names escape commas and spaces
fn escape_measurement(name: &str) -> String {
    name.replace('\\', "\\\\")
        .replace(',', "\\,")
        .replace(' ', "\\ ")
}

fn escape_field_string(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn instance_line(instance: &InstanceInfo, timestamp_ns: i64) -> String {
    let snapshot = &instance.metrics;
    format!(
        "{measurement} CPU_Usage={cpu}i,Memory_Usage={memory}i,Memory_Max={memory_max}i,Users_Current={users}i,Users_Max={users_max}i,Running={running},Module=\"{module}\" {timestamp_ns}",
        measurement = escape_measurement(instance.instance_name.as_str()),
        cpu = snapshot.cpu.raw_value,
        memory = snapshot.memory.raw_value,
        memory_max = snapshot.memory.max_value,
        users = snapshot.active_users.raw_value,
        users_max = snapshot.active_users.max_value,
        running = instance.running,
        module = escape_field_string(instance.module.as_str()),
    )
}

#[async_trait]
impl PointWriter for InfluxPointWriterImpl {
    async fn write_instance(&self, instance: &InstanceInfo) -> Result<(), EmitError> {
        let url = self.write_url()?;
        let timestamp_ns = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        let line = instance_line(instance, timestamp_ns);

        // a short-lived client per point: one point per instance per cycle
        // makes pooling pointless
        let client = reqwest::Client::new();
        let response = client
            .post(url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Token {}", self.configs.influx.token),
            )
            .header(reqwest::header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(line)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EmitError::Rejected { status, body });
        }
        Ok(())
    }
}
