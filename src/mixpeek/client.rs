use std::future::Future;

use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use tracing::{debug, warn};
use url::Url;

use super::types::{PageParams, ProviderRequest, ProviderResponse};
use crate::config::{ApiKey, Config};

const SEARCH_PATH: &str = "/features/search";

#[derive(Debug, thiserror::Error)]
pub enum MixpeekError {
    #[error("invalid Mixpeek endpoint: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to encode search request: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode search response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("failed to read search response: {0}")]
    Body(#[source] reqwest::Error),

    #[error("Mixpeek API error: {body}")]
    Api { status: u16, body: String },
}

/// The outbound half of a search: one call, one decoded response.
/// Implemented by `MixpeekClient` for production; fakes are used in tests.
pub trait SearchProvider: Send + Sync {
    fn search(
        &self,
        request: &ProviderRequest,
        page: PageParams,
    ) -> impl Future<Output = Result<ProviderResponse, MixpeekError>> + Send;
}

#[derive(Clone)]
pub struct MixpeekClient {
    http: Client,
    api_key: ApiKey,
    base_url: String,
}

impl MixpeekClient {
    pub fn from_config(http: Client, config: &Config) -> Self {
        if config.api_key.is_empty() {
            warn!("MIXPEEK_API_KEY not set; provider calls will be unauthenticated");
        }
        Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_base_url(http: Client, base_url: &str) -> Self {
        Self {
            http,
            api_key: ApiKey::from("test-key".to_string()),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, page: PageParams) -> Result<Url, MixpeekError> {
        let mut url = Url::parse(&format!("{}{SEARCH_PATH}", self.base_url))?;
        url.query_pairs_mut()
            .append_pair("page", &page.page.to_string())
            .append_pair("offset_position", &page.offset_position.to_string());
        Ok(url)
    }
}

impl SearchProvider for MixpeekClient {
    async fn search(
        &self,
        request: &ProviderRequest,
        page: PageParams,
    ) -> Result<ProviderResponse, MixpeekError> {
        let url = self.endpoint(page)?;
        let body = serde_json::to_vec(request).map_err(MixpeekError::Encode)?;

        let response = self
            .http
            .post(url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key.expose()))
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, crate::USER_AGENT)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await.map_err(MixpeekError::Body)?;

        if !status.is_success() {
            warn!(status = %status, "Mixpeek API returned an error status");
            return Err(MixpeekError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        let decoded: ProviderResponse = serde_json::from_str(&text).map_err(MixpeekError::Decode)?;
        debug!(
            results = decoded.results.as_ref().map_or(0, Vec::len),
            "mixpeek search complete"
        );
        Ok(decoded)
    }
}
