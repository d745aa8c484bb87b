use serde::Deserialize;

#[derive(Deserialize, PartialEq, Debug)]
pub struct LoginResponse {
    #[serde(rename = "sessionID")]
    pub session_id: String,
}

/// Envelope of `ADSModule/GetInstances`. The `result` key is the one thing we
/// insist on; everything below it decodes leniently to zero values.
#[derive(Deserialize, PartialEq, Debug)]
pub struct ListInstancesResponse {
    pub result: Vec<HostResponse>,
}

#[derive(Deserialize, PartialEq, Debug, Default, Clone)]
pub struct HostResponse {
    #[serde(default, rename = "Id")]
    pub id: i64,
    #[serde(default, rename = "InstanceId")]
    pub instance_id: String,
    #[serde(default, rename = "FriendlyName")]
    pub friendly_name: String,
    #[serde(default, rename = "AvailableInstances")]
    pub available_instances: Vec<InstanceResponse>,
}

#[derive(Deserialize, PartialEq, Debug, Default, Clone)]
#[allow(dead_code)]
pub struct InstanceResponse {
    #[serde(default, rename = "InstanceID")]
    pub instance_id: String,
    #[serde(default, rename = "TargetID")]
    pub target_id: String,
    #[serde(default, rename = "InstanceName")]
    pub instance_name: String,
    #[serde(default, rename = "FriendlyName")]
    pub friendly_name: String,
    #[serde(default, rename = "Module")]
    pub module: String,
    #[serde(default, rename = "ModuleDisplayName")]
    pub module_display_name: String,
    #[serde(default, rename = "IP")]
    pub ip: String,
    #[serde(default, rename = "Port")]
    pub port: u16,
    #[serde(default, rename = "Daemon")]
    pub daemon: bool,
    #[serde(default, rename = "Running")]
    pub running: bool,
    #[serde(default, rename = "Suspended")]
    pub suspended: bool,
    #[serde(default, rename = "AppState")]
    pub app_state: i64,
    #[serde(default, rename = "DiskUsageMB")]
    pub disk_usage_mb: i64,
    // the panel ships tags with no stable shape, keep them verbatim
    #[serde(default, rename = "Tags")]
    pub tags: Vec<serde_json::Value>,
    #[serde(default, rename = "Metrics")]
    pub metrics: MetricsResponse,
}

/// Gauges are keyed by their human-readable panel names. A workload that has
/// never run reports no gauges at all, which must decode to zeros, not fail.
#[derive(Deserialize, PartialEq, Debug, Default, Clone)]
pub struct MetricsResponse {
    #[serde(default, rename = "CPU Usage")]
    pub cpu_usage: GaugeResponse,
    #[serde(default, rename = "Memory Usage")]
    pub memory_usage: GaugeResponse,
    #[serde(default, rename = "Active Users")]
    pub active_users: GaugeResponse,
}

#[derive(Deserialize, PartialEq, Debug, Default, Clone)]
#[allow(dead_code)]
pub struct GaugeResponse {
    #[serde(default, rename = "RawValue")]
    pub raw_value: i64,
    #[serde(default, rename = "MaxValue")]
    pub max_value: i64,
    #[serde(default, rename = "Percent")]
    pub percent: i64,
    #[serde(default, rename = "Units")]
    pub units: String,
    #[serde(default, rename = "Color")]
    pub color: String,
    #[serde(default, rename = "Color2")]
    pub color2: String,
    #[serde(default, rename = "Color3")]
    pub color3: String,
}
