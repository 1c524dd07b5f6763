//! Client-facing services

pub mod events;

use std::sync::Arc;

use crate::{
    client::ReqwestHttpClient, config::ApiConfig, error::AppResult, repository::EventApi,
};

pub use events::EventService;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub events: EventService,
}

impl Services {
    /// Create all services backed by the remote API
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let http = ReqwestHttpClient::new(config)?;
        tracing::debug!("Using Intercom API at {}", config.base_url);

        Ok(Self {
            events: EventService::new(Arc::new(EventApi::new(http))),
        })
    }
}
