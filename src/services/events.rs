//! Events service

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::event::{Event, EventList, EventParams, EventSummaries},
    repository::EventRepository,
};

#[derive(Clone)]
pub struct EventService {
    repository: Arc<dyn EventRepository>,
}

impl EventService {
    pub fn new(repository: Arc<dyn EventRepository>) -> Self {
        Self { repository }
    }

    /// Record a new event
    pub async fn save(&self, event: &Event) -> AppResult<()> {
        self.repository.save(event).await
    }

    /// List events by Intercom user id
    pub async fn list_by_id(&self, id: &str) -> AppResult<EventList> {
        self.repository.list(EventParams::by_intercom_user_id(id)).await
    }

    pub async fn list_by_user_id(&self, user_id: &str) -> AppResult<EventList> {
        self.repository.list(EventParams::by_user_id(user_id)).await
    }

    pub async fn list_by_email(&self, email: &str) -> AppResult<EventList> {
        self.repository.list(EventParams::by_email(email)).await
    }

    /// Summarize events by Intercom user id
    pub async fn summary_by_id(&self, id: &str) -> AppResult<EventSummaries> {
        self.repository
            .summary(EventParams::by_intercom_user_id(id).with_summary())
            .await
    }

    pub async fn summary_by_user_id(&self, user_id: &str) -> AppResult<EventSummaries> {
        self.repository
            .summary(EventParams::by_user_id(user_id).with_summary())
            .await
    }

    pub async fn summary_by_email(&self, email: &str) -> AppResult<EventSummaries> {
        self.repository
            .summary(EventParams::by_email(email).with_summary())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::AppError, models::event::EventSummary, repository::MockEventRepository};
    use serde_json::Value;

    fn service(repository: MockEventRepository) -> EventService {
        EventService::new(Arc::new(repository))
    }

    /// Echo the filter back the way the server would
    fn list_for(params: EventParams) -> AppResult<EventList> {
        Ok(EventList {
            events: vec![Event {
                user_id: params.user_id,
                email: params.email,
                intercom_user_id: params.intercom_user_id,
                ..Default::default()
            }],
            ..Default::default()
        })
    }

    fn summaries_for(params: EventParams) -> AppResult<EventSummaries> {
        Ok(EventSummaries {
            user_id: params.user_id,
            email: params.email,
            intercom_user_id: params.intercom_user_id,
            events: vec![EventSummary {
                name: "govent".to_string(),
                count: 1,
                ..Default::default()
            }],
        })
    }

    #[tokio::test]
    async fn test_save_forwards_event() {
        let event = Event::new("govent")
            .with_user_id("27")
            .created_now()
            .with_metadata("is_cool", true);
        let expected = event.clone();

        let mut repository = MockEventRepository::new();
        repository
            .expect_save()
            .withf(move |e| *e == expected)
            .times(1)
            .returning(|e| {
                assert_eq!(e.user_id.as_deref(), Some("27"));
                assert_eq!(e.event_name.as_deref(), Some("govent"));
                assert_eq!(e.metadata["is_cool"], Value::Bool(true));
                Ok(())
            });

        service(repository).save(&event).await.unwrap();
    }

    #[tokio::test]
    async fn test_save_fail() {
        let mut repository = MockEventRepository::new();
        repository
            .expect_save()
            .returning(|_| Err(AppError::Internal("Missing Identifier".to_string())));

        let err = service(repository).save(&Event::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Internal error: Missing Identifier");
    }

    #[tokio::test]
    async fn test_list_sets_single_filter() {
        let mut repository = MockEventRepository::new();
        repository
            .expect_list()
            .withf(|p| {
                p.user_id.as_deref() == Some("1")
                    && p.email.is_none()
                    && p.intercom_user_id.is_none()
                    && !p.summary
            })
            .returning(list_for);
        repository
            .expect_list()
            .withf(|p| {
                p.email.as_deref() == Some("2") && p.user_id.is_none() && p.intercom_user_id.is_none()
            })
            .returning(list_for);
        repository
            .expect_list()
            .withf(|p| {
                p.intercom_user_id.as_deref() == Some("3") && p.user_id.is_none() && p.email.is_none()
            })
            .returning(list_for);
        let service = service(repository);

        let list = service.list_by_user_id("1").await.unwrap();
        assert_eq!(list.events[0].user_id.as_deref(), Some("1"));

        let list = service.list_by_email("2").await.unwrap();
        assert_eq!(list.events[0].email.as_deref(), Some("2"));

        let list = service.list_by_id("3").await.unwrap();
        assert_eq!(list.events[0].intercom_user_id.as_deref(), Some("3"));
    }

    #[tokio::test]
    async fn test_list_fail() {
        let mut repository = MockEventRepository::new();
        repository
            .expect_list()
            .returning(|_| Err(AppError::Internal("event list fail".to_string())));

        let err = service(repository).list_by_id("3").await.unwrap_err();
        assert!(matches!(err, AppError::Internal(ref msg) if msg == "event list fail"));
    }

    #[tokio::test]
    async fn test_summary_sets_flag_and_filter() {
        let mut repository = MockEventRepository::new();
        repository
            .expect_summary()
            .withf(|p| p.summary && p.kind.is_none())
            .times(3)
            .returning(summaries_for);
        let service = service(repository);

        let summaries = service.summary_by_user_id("1").await.unwrap();
        assert_eq!(summaries.user_id.as_deref(), Some("1"));
        assert!(summaries.email.is_none());

        let summaries = service.summary_by_email("2").await.unwrap();
        assert_eq!(summaries.email.as_deref(), Some("2"));

        let summaries = service.summary_by_id("3").await.unwrap();
        assert_eq!(summaries.intercom_user_id.as_deref(), Some("3"));
        assert_eq!(summaries.events[0].count, 1);
    }

    #[tokio::test]
    async fn test_summary_keeps_http_error() {
        let mut repository = MockEventRepository::new();
        repository.expect_summary().returning(|_| {
            Err(crate::error::HttpError::new(404, "not_found", "User Not Found").into())
        });

        let err = service(repository).summary_by_email("x@y.z").await.unwrap_err();
        assert_eq!(err.http_error().map(|e| e.code.as_str()), Some("not_found"));
    }
}
