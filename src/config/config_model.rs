use serde::Deserialize;

#[derive(Deserialize, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct AppSettings {
    #[serde(default)]
    pub amp: AmpSettings,
    #[serde(default)]
    pub influx: InfluxSettings,
    #[serde(default)]
    pub collector: CollectorSettings,
}

/// Connection settings for the AMP management panel.
#[derive(Deserialize, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct AmpSettings {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// The panel's own controller instance. It shows up in enumeration like any
    /// other instance but carries no workload metrics worth emitting.
    #[serde(default = "default_controller_name")]
    pub controller_name: String,
}

#[derive(Deserialize, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct InfluxSettings {
    #[serde(default)]
    pub addr: String,
    #[serde(default)]
    pub org: String,
    #[serde(default)]
    pub bucket: String,
    #[serde(default)]
    pub token: String,
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct CollectorSettings {
    #[serde(default = "duration_10_seconds")]
    #[serde(with = "humantime_serde")]
    pub interval: std::time::Duration,
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            interval: duration_10_seconds(),
        }
    }
}

fn duration_10_seconds() -> std::time::Duration {
    std::time::Duration::from_secs(10)
}

fn default_controller_name() -> String {
    "ADS01".into()
}
