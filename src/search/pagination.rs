use serde::Serialize;
use serde_json::Value;

use super::fields::Loose;

const DEFAULT_CURRENT_PAGE: u64 = 1;
const DEFAULT_PAGE_SIZE: f64 = 10.0;

/// Keys that have carried the current page across provider API versions.
const CURRENT_PAGE_KEYS: &[&str] = &["page", "current_page"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_results: u64,
    pub has_more: bool,
}

/// Derives client pagination from the provider's schemaless `pagination` object.
/// A missing or non-object payload yields the defaults.
pub fn infer_pagination(pagination: Option<&Value>) -> PaginationInfo {
    let p = Loose::new("pagination", pagination);

    let current_page = CURRENT_PAGE_KEYS
        .iter()
        .find_map(|key| p.number(key))
        .map_or(DEFAULT_CURRENT_PAGE, to_count);
    let total_pages = total_pages(&p);

    PaginationInfo {
        current_page,
        total_pages,
        total_results: p.number("total").map_or(0, to_count),
        has_more: has_more(&p, current_page, total_pages),
    }
}

fn total_pages(p: &Loose<'_>) -> u64 {
    if let Some(total_pages) = p.number("total_pages") {
        return to_count(total_pages);
    }
    let Some(total) = p.number("total") else {
        return 0;
    };
    let page_size = p
        .number("page_size")
        .filter(|size| *size >= 1.0)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .trunc();
    to_count((total.trunc() / page_size).ceil())
}

fn has_more(p: &Loose<'_>, current_page: u64, total_pages: u64) -> bool {
    if let Some(next_page) = p.str("next_page") {
        return !next_page.is_empty();
    }
    p.number("page").is_some() && current_page < total_pages
}

/// Truncates toward zero; negative and NaN values become 0.
fn to_count(n: f64) -> u64 {
    n as u64
}
