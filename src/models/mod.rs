//! Data models for the events API

pub mod event;

pub use event::{Event, EventList, EventPages, EventParams, EventSummaries, EventSummary};
