use super::request::{QueryKind, SearchRequest, ValidQuery, ValidatedRequest};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("at least one query is required")]
    NoQueries,

    #[error("query {index}: value is required")]
    MissingValue { index: usize },

    #[error("query {index}: type is required")]
    MissingType { index: usize },

    #[error("query {index}: invalid type {kind}")]
    InvalidType { index: usize, kind: String },
}

/// Checks a request before any network call is made. Stops at the first problem,
/// in query order.
pub fn validate(request: SearchRequest) -> Result<ValidatedRequest, ValidationError> {
    if request.queries.is_empty() {
        return Err(ValidationError::NoQueries);
    }

    let queries = request
        .queries
        .into_iter()
        .enumerate()
        .map(|(index, query)| {
            if query.value.is_empty() {
                return Err(ValidationError::MissingValue { index });
            }
            if query.kind.is_empty() {
                return Err(ValidationError::MissingType { index });
            }
            let kind = QueryKind::parse(&query.kind).ok_or(ValidationError::InvalidType {
                index,
                kind: query.kind,
            })?;
            Ok(ValidQuery {
                kind,
                value: query.value,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ValidatedRequest {
        queries,
        collections: request.collections.unwrap_or_default(),
        page: request.page,
        offset_position: request.offset_position,
    })
}
