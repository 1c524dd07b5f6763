//! Event model (user-triggered events, lists and per-user summaries)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Empty strings are left off the wire like absent ones
fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

fn is_unset(value: &Option<i64>) -> bool {
    value.map_or(true, |v| v == 0)
}

/// A new event that happens to a user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Assigned by the server
    #[serde(default, skip_serializing_if = "is_blank")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub user_id: Option<String>,
    /// Intercom's own identifier for the user
    #[serde(default, skip_serializing_if = "is_blank")]
    pub intercom_user_id: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub event_name: Option<String>,
    /// Unix timestamp in seconds
    #[serde(default, skip_serializing_if = "is_unset")]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, Value>,
}

impl Event {
    pub fn new(event_name: impl Into<String>) -> Self {
        Self {
            event_name: Some(event_name.into()),
            ..Default::default()
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_intercom_user_id(mut self, id: impl Into<String>) -> Self {
        self.intercom_user_id = Some(id.into());
        self
    }

    pub fn with_created_at(mut self, created_at: i64) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Stamp the event with the current time
    pub fn created_now(self) -> Self {
        self.with_created_at(Utc::now().timestamp())
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[intercom] event {{ name: {}, user_id: {}, email: {} }}",
            self.event_name.as_deref().unwrap_or_default(),
            self.user_id.as_deref().unwrap_or_default(),
            self.email.as_deref().unwrap_or_default(),
        )
    }
}

/// Pagination cursor of an event list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPages {
    #[serde(default, skip_serializing_if = "is_blank")]
    pub next: Option<String>,
}

/// One page of events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventList {
    #[serde(default)]
    pub pages: EventPages,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl EventList {
    /// Cursor of the next page, `None` on the last page
    pub fn next_page(&self) -> Option<&str> {
        self.pages.next.as_deref().filter(|next| !next.is_empty())
    }
}

/// Aggregated events for one user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventSummaries {
    #[serde(default, skip_serializing_if = "is_blank")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub intercom_user_id: Option<String>,
    #[serde(default)]
    pub events: Vec<EventSummary>,
}

/// Server-side aggregate of a single event name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventSummary {
    #[serde(default)]
    pub name: String,
    /// First occurrence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first: Option<DateTime<Utc>>,
    /// Last occurrence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<DateTime<Utc>>,
    #[serde(default)]
    pub count: i64,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub description: Option<String>,
}

/// Query parameters for `GET /events`
///
/// Exactly one identifying field is expected per call; this is left to
/// callers and not checked here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventParams {
    #[serde(rename = "type", skip_serializing_if = "is_blank")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "is_blank")]
    pub intercom_user_id: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub summary: bool,
}

impl EventParams {
    pub fn by_user_id(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Default::default()
        }
    }

    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Default::default()
        }
    }

    pub fn by_intercom_user_id(id: impl Into<String>) -> Self {
        Self {
            intercom_user_id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Ask the server for aggregates instead of raw events
    pub fn with_summary(mut self) -> Self {
        self.summary = true;
        self
    }
}
