//! AniList GraphQL cover provider

use super::{CoverError, CoverSource};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;

pub const ANILIST_ENDPOINT: &str = "https://graphql.anilist.co";

const COVER_QUERY: &str = r"query ($search: String) {
  Media(search: $search, type: ANIME) {
    coverImage {
      extraLarge
      large
    }
  }
}";

/// Looks up anime cover art by title search
pub struct AniListClient {
    client: Client,
    endpoint: String,
}

impl AniListClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, CoverError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl CoverSource for AniListClient {
    async fn find_cover(&self, title: &str) -> Result<Option<String>, CoverError> {
        let body = json!({
            "query": COVER_QUERY,
            "variables": { "search": title },
        });

        let response = self
            .client
            .post(&self.endpoint)
            .header("Accept", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        // AniList answers 404 when the search matches nothing
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(CoverError::Status {
                status: status.as_u16(),
            });
        }

        let payload: Value = response.json().await?;
        Ok(extract_cover_url(&payload))
    }
}

/// Pull the best cover URL out of a GraphQL response.
///
/// Prefers `extraLarge`, falls back to `large`. Any missing, mistyped or
/// empty field yields `None`.
pub fn extract_cover_url(payload: &Value) -> Option<String> {
    let cover = payload.pointer("/data/Media/coverImage")?;
    ["extraLarge", "large"]
        .iter()
        .filter_map(|field| cover.get(field).and_then(Value::as_str))
        .find(|url| !url.is_empty())
        .map(str::to_string)
}
