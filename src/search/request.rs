use serde::Deserialize;

/// Client search request as received on `POST /search`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub queries: Vec<SearchQuery>,
    #[serde(default)]
    pub collections: Option<Vec<String>>,
    #[serde(default)]
    pub page: u32,
    #[serde(default, alias = "offset_position")]
    pub offset_position: u32,
}

/// One client query. `type` stays a plain string until validation so that a
/// missing type and an unknown type are reported differently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchQuery {
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    Text,
    Url,
    Base64,
}

impl QueryKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "text" => Some(Self::Text),
            "url" => Some(Self::Url),
            "base64" => Some(Self::Base64),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Url => "url",
            Self::Base64 => "base64",
        }
    }
}

/// A query that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidQuery {
    pub kind: QueryKind,
    pub value: String,
}

/// A [`SearchRequest`] whose queries are known to be well formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub queries: Vec<ValidQuery>,
    pub collections: Vec<String>,
    pub page: u32,
    pub offset_position: u32,
}
