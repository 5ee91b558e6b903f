//! REST client for the hosted facts table.
//!
//! The store speaks PostgREST conventions: equality filters as
//! `column=eq.value` query pairs, inserts and updates returning the
//! affected rows when asked with `Prefer: return=representation`.

use crate::config::TuiConfig;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use til_core::{CategoryFilter, Fact, FactId, NewFact, VoteKind};

/// Hard cap on rows per fetch. The feed never paginates past this.
pub const ROW_LIMIT: u32 = 1000;

const FACTS_PATH: &str = "/rest/v1/facts";

#[derive(Debug, thiserror::Error)]
pub enum StoreClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Store rejected the request ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
    #[error("Config error: {0}")]
    Config(String),
}

/// Error body the store returns on failed requests.
#[derive(Debug, Deserialize)]
struct StoreErrorBody {
    message: String,
}

/// Single-counter update payload. Built by matching on [`VoteKind`], so
/// only the three known columns can ever appear on the wire.
#[derive(Debug, Serialize)]
struct VotePatch {
    #[serde(rename = "votesInteresting", skip_serializing_if = "Option::is_none")]
    votes_interesting: Option<u32>,
    #[serde(rename = "votesMindblowing", skip_serializing_if = "Option::is_none")]
    votes_mindblowing: Option<u32>,
    #[serde(rename = "votesFalse", skip_serializing_if = "Option::is_none")]
    votes_false: Option<u32>,
}

impl VotePatch {
    fn for_kind(kind: VoteKind, value: u32) -> Self {
        let mut patch = Self {
            votes_interesting: None,
            votes_mindblowing: None,
            votes_false: None,
        };
        match kind {
            VoteKind::Interesting => patch.votes_interesting = Some(value),
            VoteKind::Mindblowing => patch.votes_mindblowing = Some(value),
            VoteKind::False => patch.votes_false = Some(value),
        }
        patch
    }
}

#[derive(Clone)]
pub struct StoreClient {
    client: reqwest::Client,
    base_url: String,
    auth_header: HeaderMap,
}

impl StoreClient {
    pub fn new(config: &TuiConfig) -> Result<Self, StoreClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout_ms) = config.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        let client = builder.build()?;

        let auth_header = build_auth_headers(&config.api_key)?;
        Ok(Self {
            client,
            base_url: config.store_url.trim_end_matches('/').to_string(),
            auth_header,
        })
    }

    /// One read per filter change: unfiltered for `All`, else equality on
    /// the category column. Capped at [`ROW_LIMIT`] rows.
    pub async fn list_facts(
        &self,
        filter: &CategoryFilter,
    ) -> Result<Vec<Fact>, StoreClientError> {
        let url = format!("{}{}", self.base_url, FACTS_PATH);
        let mut query: Vec<(&str, String)> = vec![
            ("select", "*".to_string()),
            ("order", "id.desc".to_string()),
            ("limit", ROW_LIMIT.to_string()),
        ];
        if let Some(category) = filter.query_value() {
            query.push(("category", format!("eq.{}", category)));
        }

        let response = self
            .client
            .get(url)
            .headers(self.auth_header.clone())
            .query(&query)
            .send()
            .await?;
        self.parse_response(response).await
    }

    /// Insert one row; the store assigns id, counters, and creation year,
    /// and hands the finished row back.
    pub async fn insert_fact(&self, new_fact: &NewFact) -> Result<Fact, StoreClientError> {
        let url = format!("{}{}", self.base_url, FACTS_PATH);
        let response = self
            .client
            .post(url)
            .headers(self.auth_header.clone())
            .header("Prefer", "return=representation")
            .json(&[new_fact])
            .send()
            .await?;
        let mut rows: Vec<Fact> = self.parse_response(response).await?;
        rows.pop()
            .ok_or_else(|| StoreClientError::InvalidResponse("empty insert response".to_string()))
    }

    /// Set one counter to `current + 1` on the row matched by id, and
    /// return the store's row so the caller reconciles against it rather
    /// than a locally computed increment.
    pub async fn apply_vote(
        &self,
        id: FactId,
        kind: VoteKind,
        current: u32,
    ) -> Result<Fact, StoreClientError> {
        let url = format!("{}{}", self.base_url, FACTS_PATH);
        let patch = VotePatch::for_kind(kind, current + 1);
        let response = self
            .client
            .patch(url)
            .headers(self.auth_header.clone())
            .header("Prefer", "return=representation")
            .query(&[("id", format!("eq.{}", id))])
            .json(&patch)
            .send()
            .await?;
        let mut rows: Vec<Fact> = self.parse_response(response).await?;
        rows.pop().ok_or_else(|| {
            StoreClientError::InvalidResponse(format!("no row matched id {}", id))
        })
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, StoreClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json::<T>().await?)
        } else {
            let text = response.text().await?;
            if let Ok(body) = serde_json::from_str::<StoreErrorBody>(&text) {
                return Err(StoreClientError::Api {
                    status: status.as_u16(),
                    message: body.message,
                });
            }
            Err(StoreClientError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}

fn build_auth_headers(api_key: &str) -> Result<HeaderMap, StoreClientError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        HeaderName::from_static("apikey"),
        HeaderValue::from_str(api_key).map_err(|e| StoreClientError::Config(e.to_string()))?,
    );
    let bearer = format!("Bearer {}", api_key);
    headers.insert(
        HeaderName::from_static("authorization"),
        HeaderValue::from_str(&bearer).map_err(|e| StoreClientError::Config(e.to_string()))?,
    );
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use til_core::Category;

    #[test]
    fn test_vote_patch_carries_exactly_one_column() {
        for kind in VoteKind::ALL {
            let patch = VotePatch::for_kind(kind, 4);
            let value = serde_json::to_value(&patch).unwrap();
            let object = value.as_object().unwrap();
            assert_eq!(object.len(), 1, "patch for {:?} must touch one column", kind);
            assert_eq!(object[kind.column()], 4);
        }
    }

    #[test]
    fn test_insert_body_is_a_single_element_array() {
        let new_fact = NewFact {
            text: "Bananas are berries.".to_string(),
            source: "https://example.com/bananas".to_string(),
            category: Category::Science,
        };
        let value = serde_json::to_value([&new_fact]).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["category"], "science");
    }

    #[test]
    fn test_store_error_body_decodes() {
        let body: StoreErrorBody =
            serde_json::from_str(r#"{"message":"permission denied","code":"42501"}"#).unwrap();
        assert_eq!(body.message, "permission denied");
    }
}
