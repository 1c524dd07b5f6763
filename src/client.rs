//! HTTP client used by the API-backed repositories

use async_trait::async_trait;
use reqwest::{header::ACCEPT, RequestBuilder, Url};
use serde::Serialize;
use std::time::Duration;

use crate::{
    config::ApiConfig,
    error::{AppError, AppResult, HttpError},
};

/// Transport the repositories talk through.
///
/// Non-success statuses must come back as [`AppError::Http`].
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET `path` with `query` encoded as the query string
    async fn get<Q>(&self, path: &str, query: &Q) -> AppResult<Vec<u8>>
    where
        Q: Serialize + Sync + ?Sized;

    /// POST `body` as JSON to `path`
    async fn post<B>(&self, path: &str, body: &B) -> AppResult<Vec<u8>>
    where
        B: Serialize + Sync + ?Sized;
}

/// reqwest implementation of [`HttpClient`]
#[derive(Clone)]
pub struct ReqwestHttpClient {
    http: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

impl ReqwestHttpClient {
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        Url::parse(&config.base_url).map_err(|e| {
            AppError::Internal(format!("Invalid base URL {}: {}", config.base_url, e))
        })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> AppResult<Vec<u8>> {
        let request = match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.header(ACCEPT, "application/json").send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let error = HttpError::from_response(status, &body);
            tracing::debug!("Request failed: {}", error);
            return Err(error.into());
        }

        Ok(body.to_vec())
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get<Q>(&self, path: &str, query: &Q) -> AppResult<Vec<u8>>
    where
        Q: Serialize + Sync + ?Sized,
    {
        tracing::debug!("GET {}", path);
        self.send(self.http.get(self.url(path)).query(query)).await
    }

    async fn post<B>(&self, path: &str, body: &B) -> AppResult<Vec<u8>>
    where
        B: Serialize + Sync + ?Sized,
    {
        tracing::debug!("POST {}", path);
        self.send(self.http.post(self.url(path)).json(body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_base_url() {
        let config = ApiConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(ReqwestHttpClient::new(&config), Err(AppError::Internal(_))));
    }

    #[test]
    fn test_trims_trailing_slash() {
        let config = ApiConfig {
            base_url: "http://localhost:9000/".to_string(),
            ..Default::default()
        };
        let client = ReqwestHttpClient::new(&config).unwrap();
        assert_eq!(client.url("/events"), "http://localhost:9000/events");
    }
}
