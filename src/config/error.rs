use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid listen address '{addr}': {source}")]
    InvalidAddress {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("mail.to_email must not be empty")]
    MissingDestination,

    #[error("mail.sendmail_path must not be empty when transport is 'sendmail'")]
    MissingSendmailPath,
}
