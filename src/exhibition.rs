use crate::config::ArticConfig;
use crate::error::{Error, Result};
use crate::http::HttpClient;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

pub const SEARCH_FIELDS: &str = "id,title,aic_start_at,aic_end_at,artwork_titles";

/// An exhibition with at least one artwork title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exhibition {
    pub id: Option<u64>,
    pub title: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub artwork_titles: Vec<String>,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Option<Vec<ExhibitionRecord>>,
}

/// Exhibition as returned by the search endpoint; any field may be missing or null.
#[derive(Debug, Deserialize)]
struct ExhibitionRecord {
    id: Option<u64>,
    title: Option<String>,
    aic_start_at: Option<String>,
    aic_end_at: Option<String>,
    artwork_titles: Option<Vec<String>>,
}

impl ExhibitionRecord {
    fn into_exhibition(self) -> Option<Exhibition> {
        let artwork_titles = self.artwork_titles.filter(|t| !t.is_empty())?;
        Some(Exhibition {
            id: self.id,
            title: self.title.unwrap_or_default(),
            start_date: self.aic_start_at,
            end_date: self.aic_end_at,
            artwork_titles,
        })
    }
}

/// Compound query: title must match `term` and `artwork_titles` must exist.
pub fn build_query(term: &str) -> Value {
    json!({
        "bool": {
            "must": [{ "match": { "title": term } }],
            "filter": [{ "exists": { "field": "artwork_titles" } }],
        }
    })
}

pub struct ExhibitionClient {
    http: HttpClient,
    base_url: String,
    limit: u32,
}

impl ExhibitionClient {
    pub fn new(config: &ArticConfig) -> Result<Self> {
        let http = HttpClient::new(
            concat!("artic-tools/", env!("CARGO_PKG_VERSION")),
            config.timeout(),
        )?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            limit: config.limit,
        })
    }

    /// Search exhibitions by title. Exhibitions without artwork titles are dropped;
    /// the API's ordering is kept.
    pub async fn search(&self, term: &str) -> Result<Vec<Exhibition>> {
        let url = format!("{}/exhibitions/search", self.base_url);
        let query = serde_json::to_string(&build_query(term))
            .map_err(|e| Error::parse(format!("serialize query: {e}")))?;
        let limit = self.limit.to_string();
        let params = [
            ("q", term),
            ("query", query.as_str()),
            ("fields", SEARCH_FIELDS),
            ("limit", limit.as_str()),
        ];

        let resp: SearchResponse = self.http.get_json_query(&url, &params).await?;
        let returned = resp.data.as_ref().map_or(0, Vec::len);
        let exhibitions = keep_with_artworks(resp.data.unwrap_or_default());

        info!(
            term,
            returned,
            kept = exhibitions.len(),
            "exhibition search complete"
        );
        Ok(exhibitions)
    }
}

fn keep_with_artworks(records: Vec<ExhibitionRecord>) -> Vec<Exhibition> {
    records
        .into_iter()
        .filter_map(ExhibitionRecord::into_exhibition)
        .collect()
}
