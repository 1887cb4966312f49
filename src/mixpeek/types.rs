use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Named vector space a provider query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingModel {
    Multimodal,
    Text,
}

/// Body of `POST /features/search`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderRequest {
    pub queries: Vec<ProviderQuery>,
    pub collections: Vec<String>,
    pub return_url: bool,
    /// Always sent, as `null` when there is no session.
    pub session_id: Option<Value>,
}

impl ProviderRequest {
    pub fn new(queries: Vec<ProviderQuery>, collections: Vec<String>) -> Self {
        Self {
            queries,
            collections,
            return_url: false,
            session_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderQuery {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    pub embedding_model: EmbeddingModel,
}

/// Pagination parameters forwarded on the query string.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageParams {
    pub page: u32,
    pub offset_position: u32,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProviderResponse {
    #[serde(default)]
    pub results: Option<Vec<ProviderResult>>,
    /// Keys vary between API versions, so this stays untyped.
    #[serde(default)]
    pub pagination: Option<Value>,
    #[serde(default)]
    pub total: Option<Value>,
}

/// A single search hit. Scalar fields are decoded leniently: a value of the
/// wrong shape reads as absent instead of failing the whole response. The
/// nested mappings are read through [`crate::search::fields::Loose`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderResult {
    #[serde(default, deserialize_with = "lenient::string")]
    pub feature_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub file_data: Option<Value>,
    #[serde(default)]
    pub metadata: Option<Value>,
    #[serde(default)]
    pub original_values: Option<Value>,

    #[serde(default, deserialize_with = "lenient::number")]
    pub start_time: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub end_time: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub modality: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub transcription: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,
}

mod lenient {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use tracing::debug;

    use crate::search::fields::json_kind;

    fn present<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Value>, D::Error> {
        Ok(Option::<Value>::deserialize(d)?.filter(|v| !v.is_null()))
    }

    fn mismatch<T>(expected: &'static str, found: &Value) -> Option<T> {
        debug!(
            scope = "result",
            expected,
            found = json_kind(found),
            "provider field has unexpected type, using default"
        );
        None
    }

    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(match present(d)? {
            None => None,
            Some(Value::Number(n)) => n.as_f64(),
            Some(other) => mismatch("number", &other),
        })
    }

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match present(d)? {
            None => None,
            Some(Value::String(s)) => Some(s),
            Some(other) => mismatch("string", &other),
        })
    }

    /// RFC 3339, or an ISO 8601 timestamp without offset, which is taken as UTC.
    pub fn timestamp<'de, D: Deserializer<'de>>(d: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        let s = match present(d)? {
            None => return Ok(None),
            Some(Value::String(s)) => s,
            Some(other) => return Ok(mismatch("timestamp", &other)),
        };

        let parsed = DateTime::parse_from_rfc3339(&s)
            .map(|t| t.with_timezone(&Utc))
            .or_else(|_| {
                NaiveDateTime::parse_from_str(&s, "%Y-%m-%dT%H:%M:%S%.f").map(|n| n.and_utc())
            });
        match parsed {
            Ok(t) => Ok(Some(t)),
            Err(e) => {
                debug!(value = %s, error = %e, "unparseable provider timestamp, using default");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode_result(value: Value) -> ProviderResult {
        let response: ProviderResponse =
            serde_json::from_value(json!({ "results": [value] })).unwrap();
        response.results.unwrap().remove(0)
    }

    #[test]
    fn request_serializes_with_provider_field_names() {
        let request = ProviderRequest::new(
            vec![ProviderQuery {
                kind: "text".into(),
                value: "car chase".into(),
                embedding_model: EmbeddingModel::Multimodal,
            }],
            vec!["movie_trailers".into()],
        );

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "queries": [{"type": "text", "value": "car chase", "embedding_model": "multimodal"}],
                "collections": ["movie_trailers"],
                "return_url": false,
                "session_id": null
            })
        );
    }

    #[test]
    fn response_tolerates_nulls_and_missing_fields() {
        let response: ProviderResponse = serde_json::from_value(json!({
            "results": [{
                "feature_id": "f1",
                "score": 0.5,
                "start_time": null,
                "file_data": null
            }],
            "pagination": null
        }))
        .unwrap();

        let results = response.results.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].feature_id.as_deref(), Some("f1"));
        assert_eq!(results[0].score, Some(0.5));
        assert!(results[0].start_time.is_none());
        assert!(results[0].file_data.is_none());
        assert!(results[0].created_at.is_none());
        assert!(response.pagination.is_none());
    }

    #[test]
    fn response_with_null_results_decodes() {
        let response: ProviderResponse =
            serde_json::from_value(json!({"results": null, "total": 0})).unwrap();
        assert!(response.results.is_none());
    }

    #[test]
    fn stringly_start_time_reads_as_absent() {
        let result = decode_result(json!({"feature_id": "f", "start_time": "12.5", "end_time": 3}));
        assert!(result.start_time.is_none());
        assert_eq!(result.end_time, Some(3.0));
    }

    #[test]
    fn null_score_reads_as_absent() {
        let result = decode_result(json!({"feature_id": "f", "score": null}));
        assert!(result.score.is_none());
    }

    #[test]
    fn mistyped_strings_read_as_absent() {
        let result = decode_result(json!({
            "feature_id": 17,
            "modality": ["video"],
            "transcription": {"text": "hi"},
            "description": false
        }));
        assert!(result.feature_id.is_none());
        assert!(result.modality.is_none());
        assert!(result.transcription.is_none());
        assert!(result.description.is_none());
    }

    #[test]
    fn timestamp_without_offset_is_taken_as_utc() {
        let result = decode_result(json!({"created_at": "2024-05-01T12:00:00"}));
        assert_eq!(
            result.created_at.map(|t| t.to_rfc3339()),
            Some("2024-05-01T12:00:00+00:00".to_string())
        );
    }

    #[test]
    fn timestamp_with_offset_is_normalized_to_utc() {
        let result = decode_result(json!({"created_at": "2024-05-01T14:00:00+02:00"}));
        assert_eq!(
            result.created_at.map(|t| t.to_rfc3339()),
            Some("2024-05-01T12:00:00+00:00".to_string())
        );
    }

    #[test]
    fn garbage_timestamp_reads_as_absent() {
        assert!(decode_result(json!({"created_at": "yesterday"})).created_at.is_none());
        assert!(decode_result(json!({"created_at": 1714564800})).created_at.is_none());
    }

    #[test]
    fn one_malformed_record_does_not_fail_the_others() {
        let response: ProviderResponse = serde_json::from_value(json!({
            "results": [
                {"feature_id": "bad", "score": "high", "start_time": "soon"},
                {"feature_id": "good", "score": 0.8}
            ]
        }))
        .unwrap();

        let results = response.results.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].score, Some(0.8));
    }
}
