use crate::mixpeek::types::{EmbeddingModel, ProviderQuery};

use super::request::{QueryKind, ValidQuery};

/// Fans each client query out into the embedding spaces it is searched in.
/// Every query goes to `multimodal`; text queries also go to `text`. Order is
/// preserved and each query's expansions stay adjacent.
pub fn expand_queries(queries: &[ValidQuery]) -> Vec<ProviderQuery> {
    queries
        .iter()
        .flat_map(|query| {
            embedding_models(query.kind)
                .iter()
                .map(move |&embedding_model| ProviderQuery {
                    kind: query.kind.as_str().to_string(),
                    value: query.value.clone(),
                    embedding_model,
                })
        })
        .collect()
}

fn embedding_models(kind: QueryKind) -> &'static [EmbeddingModel] {
    match kind {
        QueryKind::Text => &[EmbeddingModel::Multimodal, EmbeddingModel::Text],
        QueryKind::Url | QueryKind::Base64 => &[EmbeddingModel::Multimodal],
    }
}

/// Falls back to the configured collection when the client named none.
pub fn resolve_collections(collections: Vec<String>, default_collection: &str) -> Vec<String> {
    if collections.is_empty() {
        vec![default_collection.to_string()]
    } else {
        collections
    }
}
