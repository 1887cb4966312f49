use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use super::classify::{MatchType, classify};
use super::fields::Loose;
use crate::mixpeek::types::ProviderResult;

/// Client-facing search hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResult {
    pub id: String,
    pub url: String,
    pub score: f64,
    pub start_time: f64,
    pub end_time: f64,
    pub description: String,
    pub transcript: String,
    pub created_at: Option<DateTime<Utc>>,
    pub match_type: MatchType,
    pub thumbnail_url: String,
    pub title: String,
    pub duration: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_metadata: Option<Value>,
}

#[derive(Clone, Copy)]
enum Source {
    FileData,
    Metadata,
}

/// Where the asset URL may live, in the order it is looked up. The provider
/// places it differently depending on the result type.
const URL_SOURCES: &[(Source, &str)] = &[(Source::FileData, "url"), (Source::Metadata, "url")];

struct Mappings<'a> {
    file_data: Loose<'a>,
    metadata: Loose<'a>,
}

impl<'a> Mappings<'a> {
    fn of(result: &'a ProviderResult) -> Self {
        Self {
            file_data: Loose::new("file_data", result.file_data.as_ref()),
            metadata: Loose::new("metadata", result.metadata.as_ref()),
        }
    }

    fn source(&self, source: Source) -> &Loose<'a> {
        match source {
            Source::FileData => &self.file_data,
            Source::Metadata => &self.metadata,
        }
    }

    fn url(&self) -> &'a str {
        URL_SOURCES
            .iter()
            .find_map(|&(source, key)| self.source(source).str(key).filter(|u| !u.is_empty()))
            .unwrap_or_default()
    }
}

pub fn normalize(result: &ProviderResult) -> NormalizedResult {
    let mappings = Mappings::of(result);
    let file_data = mappings.file_data;

    NormalizedResult {
        id: result.feature_id.clone().unwrap_or_default(),
        url: mappings.url().to_string(),
        score: result.score.unwrap_or(0.0),
        start_time: result.start_time.unwrap_or(0.0),
        end_time: result.end_time.unwrap_or(0.0),
        description: result.description.clone().unwrap_or_default(),
        transcript: result.transcription.clone().unwrap_or_default(),
        created_at: result.created_at,
        match_type: classify(result),
        thumbnail_url: file_data.str("thumbnail").unwrap_or_default().to_string(),
        title: file_data.str("file_name").unwrap_or_default().to_string(),
        duration: file_data.number("duration").unwrap_or(0.0),
        original_metadata: result.metadata.clone().filter(|m| !m.is_null()),
    }
}
