// Gateway configuration sections
// Every section maps to one `[table]` of config.toml or a `GATEWAY__<SECTION>__<KEY>` variable

use serde::{de, Deserialize, Deserializer};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    #[serde(default)]
    pub ratings: RatingsConfig,
    pub mail: MailConfig,
}

/// Listen address and runtime sizing
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Tokio worker threads; one per core when unset
    pub workers: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// `error`, `warn`, `info` or `debug`
    pub level: String,
    pub access_log: bool,
    /// `combined`, `common`, `json`, or a `$variable` pattern
    pub access_log_format: String,
    /// Append access and info lines here instead of stdout
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Append warnings and errors here instead of stderr
    #[serde(default)]
    pub error_log_file: Option<String>,
}

/// Connection timeouts in seconds
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    /// `0` disables keep-alive
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    /// Value of the `Server` response header
    pub server_name: String,
    pub enable_cors: bool,
    /// Largest accepted form body in bytes
    pub max_body_size: u64,
    #[serde(default)]
    pub health: HealthConfig,
}

/// Liveness and readiness probes, answered with `200 ok`
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct HealthConfig {
    pub enabled: bool,
    pub liveness_path: String,
    pub readiness_path: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            liveness_path: "/healthz".to_string(),
            readiness_path: "/readyz".to_string(),
        }
    }
}

/// Box numbers for the six rating widgets (`r1`..`r6`).
///
/// A missing or zero entry behaves like an unknown widget.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RatingsConfig {
    #[serde(deserialize_with = "box_num")]
    pub widget_1: Option<i64>,
    #[serde(deserialize_with = "box_num")]
    pub widget_2: Option<i64>,
    #[serde(deserialize_with = "box_num")]
    pub widget_3: Option<i64>,
    #[serde(deserialize_with = "box_num")]
    pub widget_4: Option<i64>,
    #[serde(deserialize_with = "box_num")]
    pub widget_5: Option<i64>,
    #[serde(deserialize_with = "box_num")]
    pub widget_6: Option<i64>,
}

/// Accept an integer, a numeric string, or an empty string (unset)
fn box_num<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Int(n)) => Ok(Some(n)),
        Some(Raw::Text(text)) => match text.trim() {
            "" => Ok(None),
            trimmed => trimmed.parse().map(Some).map_err(|_| {
                de::Error::custom(format!("expected an integer box number, found {text:?}"))
            }),
        },
    }
}

/// Contact mailer configuration
#[derive(Debug, Deserialize, Clone)]
pub struct MailConfig {
    /// Destination address for every contact submission
    pub to_email: String,
    pub transport: TransportKind,
    pub sendmail_path: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    /// Pipe messages into the local sendmail binary
    Sendmail,
    /// Only write messages to the server log
    Log,
}
