use super::record::Record;
use serde::{Deserialize, Serialize};

/// Paginated list body: `{ "results": [...], "count": n, ... }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page {
    pub results: Vec<Record>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
}

/// Body of `GET <resource>`: either a bare array or a paginated envelope.
/// Resolved once at the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FetchEnvelope {
    Paginated(Page),
    Bare(Vec<Record>),
}

impl FetchEnvelope {
    pub fn records(&self) -> &[Record] {
        match self {
            FetchEnvelope::Paginated(page) => &page.results,
            FetchEnvelope::Bare(records) => records,
        }
    }

    pub fn into_records(self) -> Vec<Record> {
        match self {
            FetchEnvelope::Paginated(page) => page.results,
            FetchEnvelope::Bare(records) => records,
        }
    }

    /// Server-side total when the envelope reports one
    pub fn total(&self) -> Option<u64> {
        match self {
            FetchEnvelope::Paginated(page) => page.count,
            FetchEnvelope::Bare(_) => None,
        }
    }
}
