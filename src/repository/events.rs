//! Events repository backed by the remote API

use async_trait::async_trait;

use super::EventRepository;
use crate::{
    client::HttpClient,
    error::AppResult,
    models::event::{Event, EventList, EventParams, EventSummaries},
};

const EVENTS_PATH: &str = "/events";

#[derive(Clone)]
pub struct EventApi<H> {
    http: H,
}

impl<H: HttpClient> EventApi<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    /// Shared GET for lists and summaries; lookups are always by user
    async fn fetch(&self, mut params: EventParams) -> AppResult<Vec<u8>> {
        params.kind = Some("user".to_string());
        tracing::debug!("Fetching events with {:?}", params);
        self.http.get(EVENTS_PATH, &params).await
    }
}

#[async_trait]
impl<H: HttpClient> EventRepository for EventApi<H> {
    async fn save(&self, event: &Event) -> AppResult<()> {
        tracing::debug!("Saving {}", event);
        self.http.post(EVENTS_PATH, event).await?;
        Ok(())
    }

    async fn list(&self, params: EventParams) -> AppResult<EventList> {
        let data = self.fetch(params).await?;
        Ok(serde_json::from_slice(&data)?)
    }

    async fn summary(&self, params: EventParams) -> AppResult<EventSummaries> {
        let data = self.fetch(params).await?;
        Ok(serde_json::from_slice(&data)?)
    }
}
