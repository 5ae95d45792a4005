// Application state module
// Holds the read-only configuration and the collaborators shared by every request

use std::sync::Arc;

use super::types::{Config, TransportKind};
use crate::contact::{LogTransport, MailTransport, SendmailTransport};
use crate::rating::RatingTable;

/// Application state
pub struct AppState {
    pub config: Config,
    pub ratings: RatingTable,
    pub transport: Arc<dyn MailTransport>,
}

impl AppState {
    /// Build state with the transport selected in `mail.transport`
    pub fn new(config: &Config) -> Self {
        let transport: Arc<dyn MailTransport> = match config.mail.transport {
            TransportKind::Sendmail => {
                Arc::new(SendmailTransport::new(config.mail.sendmail_path.clone()))
            }
            TransportKind::Log => Arc::new(LogTransport),
        };
        Self::with_transport(config, transport)
    }

    /// Build state around an explicit transport
    pub fn with_transport(config: &Config, transport: Arc<dyn MailTransport>) -> Self {
        Self {
            config: config.clone(),
            ratings: RatingTable::from_config(&config.ratings),
            transport,
        }
    }
}
