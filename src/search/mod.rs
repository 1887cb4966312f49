//! Search translation: validate the client request, fan it out to Mixpeek, and
//! normalize what comes back.

mod classify;
mod expand;
pub(crate) mod fields;
mod normalize;
mod pagination;
mod request;
mod validate;

pub use classify::MatchType;
pub use normalize::NormalizedResult;
pub use pagination::PaginationInfo;
pub use request::SearchRequest;
pub use validate::ValidationError;

use serde::Serialize;
use tracing::{debug, info};

use crate::mixpeek::types::{PageParams, ProviderRequest, ProviderResponse};
use crate::mixpeek::{MixpeekError, SearchProvider};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    pub results: Vec<NormalizedResult>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Provider(#[from] MixpeekError),
}

/// Runs one client search end to end. Makes exactly one provider call.
pub async fn run(
    provider: &impl SearchProvider,
    default_collection: &str,
    request: SearchRequest,
) -> Result<SearchResponse, SearchError> {
    let validated = validate::validate(request)?;

    let collections = expand::resolve_collections(validated.collections, default_collection);
    let provider_request =
        ProviderRequest::new(expand::expand_queries(&validated.queries), collections);
    let page = PageParams {
        page: validated.page,
        offset_position: validated.offset_position,
    };

    info!(
        queries = validated.queries.len(),
        provider_queries = provider_request.queries.len(),
        collections = ?provider_request.collections,
        page = page.page,
        offset_position = page.offset_position,
        "search"
    );

    let response = provider.search(&provider_request, page).await?;
    let search_response = build_response(&response);

    info!(results = search_response.results.len(), "search complete");
    Ok(search_response)
}

fn build_response(response: &ProviderResponse) -> SearchResponse {
    if let Some(total) = &response.total {
        debug!(%total, "provider reported top-level total");
    }

    let results = response
        .results
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(normalize::normalize)
        .collect();

    SearchResponse {
        results,
        pagination: pagination::infer_pagination(response.pagination.as_ref()),
    }
}
