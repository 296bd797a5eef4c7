use std::sync::Arc;

use {
    crate::{config::BotConfig, outbound::MessagingGateway},
    jobgram_directory::{SessionModes, UserDirectory},
    jobgram_listings::ListingClient,
};

/// Shared dependencies handed to every handler invocation.
pub struct BotState {
    pub config: BotConfig,
    pub directory: Arc<dyn UserDirectory>,
    pub modes: SessionModes,
    pub listings: ListingClient,
    pub gateway: Arc<dyn MessagingGateway>,
}

impl BotState {
    pub fn new(
        config: BotConfig,
        directory: Arc<dyn UserDirectory>,
        gateway: Arc<dyn MessagingGateway>,
    ) -> Self {
        let listings = ListingClient::new(config.api_url.clone());
        Self {
            config,
            directory,
            modes: SessionModes::new(),
            listings,
            gateway,
        }
    }
}
