//! Job search against the JSearch (RapidAPI) service.
//!
//! Job search is a best-effort enrichment: callers degrade a failed search
//! to an empty posting list instead of failing their request, so the error
//! type here never reaches a client.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const JSEARCH_API_URL: &str = "https://jsearch.p.rapidapi.com/search";
const JSEARCH_HOST: &str = "jsearch.p.rapidapi.com";

#[derive(Debug, Error)]
pub enum JobSearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// One job posting, passed through to the frontend as-is. Only the fields
/// the frontend renders are modeled; everything else upstream sends is
/// dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(default)]
    pub job_id: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub employer_name: String,
    #[serde(default)]
    pub job_city: Option<String>,
    #[serde(default)]
    pub job_state: Option<String>,
    #[serde(default)]
    pub job_country: Option<String>,
    #[serde(default)]
    pub job_apply_link: String,
    #[serde(default)]
    pub job_employment_type: Option<String>,
    #[serde(default)]
    pub job_posted_at_datetime_utc: Option<DateTime<Utc>>,
}

/// Search seam. `AppState` carries this as `Arc<dyn JobSearchClient>`.
#[async_trait]
pub trait JobSearchClient: Send + Sync {
    /// Fetches one page of postings for the query.
    async fn search(&self, query: &str, page: u32) -> Result<Vec<JobPosting>, JobSearchError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<JobPosting>,
}

/// Production client for the JSearch API.
#[derive(Clone)]
pub struct JSearchClient {
    client: Client,
    api_key: String,
    search_url: String,
}

impl JSearchClient {
    pub fn new(api_key: String) -> Self {
        Self::with_search_url(api_key, JSEARCH_API_URL.to_string())
    }

    /// Points the client at an alternate endpoint. Used by tests.
    pub fn with_search_url(api_key: String, search_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            search_url,
        }
    }
}

#[async_trait]
impl JobSearchClient for JSearchClient {
    async fn search(&self, query: &str, page: u32) -> Result<Vec<JobPosting>, JobSearchError> {
        let page = page.to_string();
        let response = self
            .client
            .get(&self.search_url)
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", JSEARCH_HOST)
            .query(&[
                ("query", query),
                ("page", page.as_str()),
                ("num_pages", "1"),
            ])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JobSearchError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let envelope: SearchResponse = response.json().await?;

        debug!(
            "JSearch returned {} postings for query {:?}",
            envelope.data.len(),
            query
        );

        Ok(envelope.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const SEARCH_BODY: &str = r#"{
        "status": "OK",
        "request_id": "abc-123",
        "data": [
            {
                "job_id": "j1",
                "job_title": "Senior Rust Engineer",
                "employer_name": "Acme Corp",
                "job_city": "Austin",
                "job_state": "TX",
                "job_country": "US",
                "job_apply_link": "https://example.com/apply/j1",
                "job_employment_type": "FULLTIME",
                "job_posted_at_datetime_utc": "2024-04-02T00:00:00.000Z"
            },
            {
                "job_id": "j2",
                "job_title": "Backend Engineer",
                "employer_name": "Widget Inc",
                "job_apply_link": "https://example.com/apply/j2"
            }
        ]
    }"#;

    #[tokio::test]
    async fn test_search_passes_query_page_and_num_pages() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/search")
            .match_header("x-rapidapi-key", "test-key")
            .match_header("x-rapidapi-host", JSEARCH_HOST)
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("query".into(), "Rust Engineer Rust, Tokio".into()),
                Matcher::UrlEncoded("page".into(), "2".into()),
                Matcher::UrlEncoded("num_pages".into(), "1".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(SEARCH_BODY)
            .expect(1)
            .create_async()
            .await;

        let client = JSearchClient::with_search_url(
            "test-key".to_string(),
            format!("{}/search", server.url()),
        );
        let postings = client.search("Rust Engineer Rust, Tokio", 2).await.unwrap();

        assert_eq!(postings.len(), 2);
        assert_eq!(postings[0].job_id, "j1");
        assert_eq!(postings[0].job_city.as_deref(), Some("Austin"));
        assert!(postings[0].job_posted_at_datetime_utc.is_some());
        assert_eq!(postings[1].employer_name, "Widget Inc");
        assert!(postings[1].job_city.is_none());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_data_key_yields_empty_list() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"status": "OK"}"#)
            .create_async()
            .await;

        let client = JSearchClient::with_search_url(
            "test-key".to_string(),
            format!("{}/search", server.url()),
        );
        let postings = client.search("anything", 1).await.unwrap();

        assert!(postings.is_empty());
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/search")
            .match_query(Matcher::Any)
            .with_status(429)
            .with_body("rate limited")
            .create_async()
            .await;

        let client = JSearchClient::with_search_url(
            "test-key".to_string(),
            format!("{}/search", server.url()),
        );
        let result = client.search("anything", 1).await;

        match result {
            Err(JobSearchError::Api { status, message }) => {
                assert_eq!(status, 429);
                assert_eq!(message, "rate limited");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_posting_serializes_with_passthrough_field_names() {
        let posting = JobPosting {
            job_id: "j1".to_string(),
            job_title: "Engineer".to_string(),
            employer_name: "Acme".to_string(),
            job_city: None,
            job_state: None,
            job_country: None,
            job_apply_link: "https://example.com".to_string(),
            job_employment_type: None,
            job_posted_at_datetime_utc: None,
        };
        let value = serde_json::to_value(&posting).unwrap();
        assert_eq!(value["job_title"], "Engineer");
        assert!(value.get("job_apply_link").is_some());
    }
}
