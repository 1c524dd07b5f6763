//! Repository layer for the events API

pub mod events;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::event::{Event, EventList, EventParams, EventSummaries},
};

pub use events::EventApi;

/// Operations the events service needs from a backing store
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn save(&self, event: &Event) -> AppResult<()>;

    async fn list(&self, params: EventParams) -> AppResult<EventList>;

    async fn summary(&self, params: EventParams) -> AppResult<EventSummaries>;
}
