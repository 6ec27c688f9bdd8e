use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::models::{Submission, SubmissionDraft};

/// Thin client for the upstream submissions API.
///
/// Holds the one base URL resolved at startup. Requests carry no retry, no
/// timeout and no auth header; every failure is reported straight back to
/// the caller.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
}

impl ApiClient {
    pub fn new(base: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: base.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    pub async fn list(&self) -> Result<Vec<Submission>, ApiError> {
        let resp = self.http.get(self.url("/submissions")).send().await?;
        decode(resp).await
    }

    pub async fn fetch(&self, id: i64) -> Result<Submission, ApiError> {
        let resp = self
            .http
            .get(self.url(&format!("/submissions/{id}")))
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn create(&self, draft: &SubmissionDraft) -> Result<Submission, ApiError> {
        let resp = self
            .http
            .post(self.url("/submissions"))
            .json(draft)
            .send()
            .await?;
        decode(resp).await
    }

    pub async fn update(&self, id: i64, draft: &SubmissionDraft) -> Result<Submission, ApiError> {
        let resp = self
            .http
            .put(self.url(&format!("/submissions/{id}")))
            .json(draft)
            .send()
            .await?;
        decode(resp).await
    }

    /// Deletes a submission. The upstream signals success with status 204
    /// specifically; any other status, 2xx included, counts as failure.
    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let resp = self
            .http
            .delete(self.url(&format!("/submissions/{id}")))
            .send()
            .await?;
        if resp.status() == StatusCode::NO_CONTENT {
            Ok(())
        } else {
            Err(ApiError::Status(resp.status()))
        }
    }
}

async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ApiError::Status(status));
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::MalformedBody(e.to_string()))
}
