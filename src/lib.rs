//! Intercom events client
//!
//! A typed client for the Intercom events API: record events for a user and
//! read back paginated event lists or per-user summaries.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use client::{HttpClient, ReqwestHttpClient};
pub use config::AppConfig;
pub use error::{AppError, AppResult, HttpError};
pub use models::{Event, EventList, EventParams, EventSummaries, EventSummary};
pub use repository::{EventApi, EventRepository};
pub use services::{EventService, Services};
