use serde::Deserialize;

/// Paging overrides accepted on the `/search` query string.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub page: Option<u32>,
    #[serde(alias = "offset_position")]
    pub offset_position: Option<u32>,
}

impl PageQuery {
    /// Query-string values take precedence over the ones in the body.
    pub fn apply(&self, request: &mut crate::search::SearchRequest) {
        if let Some(page) = self.page {
            request.page = page;
        }
        if let Some(offset) = self.offset_position {
            request.offset_position = offset;
        }
    }
}
