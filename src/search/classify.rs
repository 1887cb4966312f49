use serde::Serialize;

use super::fields::Loose;
use crate::mixpeek::types::ProviderResult;

/// Which embedding space a result matched in, as reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Multimodal,
    Video,
    Visual,
    Text,
    Unknown,
}

/// `original_values` keys, highest priority first.
const ORIGINAL_VALUE_RULES: &[(&str, MatchType)] = &[
    ("multimodal", MatchType::Multimodal),
    ("video", MatchType::Video),
    ("image", MatchType::Visual),
    ("text", MatchType::Text),
];

/// Fallback for older response shapes that only carry `modality`.
const MODALITY_RULES: &[(&str, MatchType)] = &[
    ("video", MatchType::Video),
    ("image", MatchType::Visual),
    ("text", MatchType::Text),
];

pub fn classify(result: &ProviderResult) -> MatchType {
    let original_values = Loose::new("original_values", result.original_values.as_ref());

    ORIGINAL_VALUE_RULES
        .iter()
        .find(|(key, _)| original_values.contains(key))
        .or_else(|| {
            let modality = result.modality.as_deref()?;
            MODALITY_RULES.iter().find(|(name, _)| *name == modality)
        })
        .map_or(MatchType::Unknown, |&(_, match_type)| match_type)
}
