use crate::client::amp_json_protocol::{
    GaugeResponse, HostResponse, InstanceResponse, MetricsResponse,
};

/// One management host and the instances it reported, in enumeration order.
/// Lives for a single collection cycle and is dropped with it.
#[derive(Clone, Debug, PartialEq)]
#[allow(dead_code)]
pub struct HostGroup {
    pub id: i64,
    pub instance_id: String,
    pub friendly_name: String,
    pub instances: Vec<InstanceInfo>,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[allow(dead_code)]
pub struct InstanceInfo {
    pub instance_name: String,
    pub friendly_name: String,
    pub module: String,
    pub running: bool,
    pub suspended: bool,
    pub metrics: MetricSnapshot,
    // opaque passthrough, never interpreted
    pub tags: Vec<serde_json::Value>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetricSnapshot {
    pub cpu: GaugeValue,
    pub memory: GaugeValue,
    pub active_users: GaugeValue,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[allow(dead_code)]
pub struct GaugeValue {
    pub raw_value: i64,
    pub max_value: i64,
    pub percent: i64,
    pub units: String,
}

impl From<HostResponse> for HostGroup {
    fn from(value: HostResponse) -> Self {
        Self {
            id: value.id,
            instance_id: value.instance_id,
            friendly_name: value.friendly_name,
            instances: value
                .available_instances
                .into_iter()
                .map(InstanceInfo::from)
                .collect(),
        }
    }
}

impl From<InstanceResponse> for InstanceInfo {
    fn from(value: InstanceResponse) -> Self {
        Self {
            instance_name: value.instance_name,
            friendly_name: value.friendly_name,
            module: value.module,
            running: value.running,
            suspended: value.suspended,
            metrics: MetricSnapshot::from(value.metrics),
            tags: value.tags,
        }
    }
}

impl From<MetricsResponse> for MetricSnapshot {
    fn from(value: MetricsResponse) -> Self {
        Self {
            cpu: GaugeValue::from(value.cpu_usage),
            memory: GaugeValue::from(value.memory_usage),
            active_users: GaugeValue::from(value.active_users),
        }
    }
}

impl From<GaugeResponse> for GaugeValue {
    // color hints are display-only, nothing downstream wants them
    fn from(value: GaugeResponse) -> Self {
        Self {
            raw_value: value.raw_value,
            max_value: value.max_value,
            percent: value.percent,
            units: value.units,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_keeps_every_instance_in_order() {
        let host = HostResponse {
            id: 7,
            instance_id: "h7".to_string(),
            friendly_name: "node07".to_string(),
            available_instances: vec![
                InstanceResponse {
                    instance_name: "A".to_string(),
                    ..Default::default()
                },
                InstanceResponse {
                    instance_name: "B".to_string(),
                    ..Default::default()
                },
                InstanceResponse {
                    instance_name: "C".to_string(),
                    ..Default::default()
                },
            ],
        };

        let group = HostGroup::from(host);
        assert_eq!(group.id, 7);
        assert_eq!(group.friendly_name, "node07");
        let names: Vec<&str> = group
            .instances
            .iter()
            .map(|instance| instance.instance_name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn gauges_map_values_and_drop_colors() {
        let gauge = GaugeResponse {
            raw_value: 42,
            max_value: 100,
            percent: 42,
            units: "%".to_string(),
            color: "#A8A8A8".to_string(),
            color2: "#F3F3F3".to_string(),
            color3: "#C2C2C2".to_string(),
        };

        let value = GaugeValue::from(gauge);
        assert_eq!(value.raw_value, 42);
        assert_eq!(value.max_value, 100);
        assert_eq!(value.percent, 42);
        assert_eq!(value.units, "%");
    }

    #[test]
    fn default_metrics_convert_to_zero_snapshot() {
        let instance = InstanceResponse {
            instance_name: "Fresh01".to_string(),
            ..Default::default()
        };

        let info = InstanceInfo::from(instance);
        assert_eq!(info.metrics, MetricSnapshot::default());
        assert!(!info.running);
        assert!(info.tags.is_empty());
    }
}
