// Configuration module entry point
// Loads layered configuration (file, environment, defaults) and the runtime state built from it

mod error;
mod state;
mod types;

use config::builder::DefaultState;
use config::ConfigBuilder;
use std::net::SocketAddr;

// Re-export public types
pub use error::ConfigError;
pub use state::AppState;
pub use types::{Config, RatingsConfig, TransportKind};

/// Environment variable prefix, e.g. `GATEWAY__MAIL__TO_EMAIL`
const ENV_PREFIX: &str = "GATEWAY";

/// `GATEWAY__SECTION__KEY` variables; empty values are treated as unset
fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
        .ignore_empty(true)
}

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(environment());
        Self::build(builder)
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings = builder
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "contact-gateway")?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 65_536)? // 64KB
            .set_default("mail.to_email", "")?
            .set_default("mail.transport", "sendmail")?
            .set_default("mail.sendmail_path", "/usr/sbin/sendmail")?
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    #[cfg(test)]
    pub(crate) fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Self::build(
            config::Config::builder()
                .add_source(config::File::from_str(toml, config::FileFormat::Toml)),
        )
    }

    /// Reject configurations the server cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.get_socket_addr()?;
        if self.mail.to_email.trim().is_empty() {
            return Err(ConfigError::MissingDestination);
        }
        if self.mail.transport == TransportKind::Sendmail
            && self.mail.sendmail_path.trim().is_empty()
        {
            return Err(ConfigError::MissingSendmailPath);
        }
        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|source| ConfigError::InvalidAddress { addr, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::RatingTable;

    fn from_toml(toml: &str) -> Result<Config, ConfigError> {
        Config::from_toml_str(toml)
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let cfg = from_toml(
            r#"
            [mail]
            to_email = "owner@example.com"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.http.max_body_size, 65_536);
        assert!(cfg.http.health.enabled);
        assert_eq!(cfg.mail.transport, TransportKind::Sendmail);
        assert_eq!(cfg.mail.sendmail_path, "/usr/sbin/sendmail");
        assert_eq!(cfg.ratings, RatingsConfig::default());
    }

    #[test]
    fn test_ratings_section() {
        let cfg = from_toml(
            r#"
            [ratings]
            widget_1 = 7
            widget_3 = 42

            [mail]
            to_email = "owner@example.com"
            transport = "log"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.ratings.widget_1, Some(7));
        assert_eq!(cfg.ratings.widget_2, None);
        assert_eq!(cfg.ratings.widget_3, Some(42));
        assert_eq!(cfg.mail.transport, TransportKind::Log);
    }

    #[test]
    fn test_missing_destination_rejected() {
        let err = from_toml("").unwrap_err();
        assert!(matches!(err, ConfigError::MissingDestination));
    }

    #[test]
    fn test_invalid_host_rejected() {
        let err = from_toml(
            r#"
            [server]
            host = "not an ip"

            [mail]
            to_email = "owner@example.com"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidAddress { .. }));
    }

    #[test]
    fn test_empty_box_number_is_unset() {
        let cfg = from_toml(
            r#"
            [ratings]
            widget_1 = "4"
            widget_3 = ""

            [mail]
            to_email = "owner@example.com"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.ratings.widget_1, Some(4));
        assert_eq!(cfg.ratings.widget_3, None);
        let table = RatingTable::from_config(&cfg.ratings);
        assert_eq!(table.lookup("r1"), 4);
        assert_eq!(table.lookup("r3"), 0);
    }

    #[test]
    fn test_non_numeric_box_number_rejected() {
        let err = from_toml(
            r#"
            [ratings]
            widget_2 = "lots"

            [mail]
            to_email = "owner@example.com"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn test_empty_environment_value_is_unset() {
        let vars: config::Map<String, String> = [
            ("GATEWAY__MAIL__TO_EMAIL", "owner@example.com"),
            ("GATEWAY__RATINGS__WIDGET_2", "7"),
            ("GATEWAY__RATINGS__WIDGET_3", ""),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let cfg = Config::build(
            config::Config::builder().add_source(environment().source(Some(vars))),
        )
        .unwrap();

        let table = RatingTable::from_config(&cfg.ratings);
        assert_eq!(table.lookup("r2"), 7);
        assert_eq!(table.lookup("r3"), 0);
    }

    #[test]
    fn test_unknown_transport_rejected() {
        let err = from_toml(
            r#"
            [mail]
            to_email = "owner@example.com"
            transport = "carrier-pigeon"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }
}
