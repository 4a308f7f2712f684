//! Search request translation
//!
//! Turns the caller-facing search parameters into the request sent to the
//! search index. The ranking shape is fixed: four text fields with fixed
//! weights, ordered by match score then preferred label.

mod client;

pub use client::*;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Fields searched, most significant first.
pub const QUERY_BY: [&str; 4] = ["pref_label", "labels", "description", "lyrics"];

/// Relative weights of [`QUERY_BY`].
pub const QUERY_BY_WEIGHTS: [u32; 4] = [10, 8, 3, 1];

/// Result ordering.
pub const SORT_BY: &str = "_text_match:desc,pref_label:asc";

/// Page size of the UI search.
pub const UI_PER_PAGE: u32 = 30;

/// Which surface a search is issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Session-gated search backing the UI; fixed page size, no filters.
    Ui,
    /// API-key-gated pass-through search; index default page size.
    Raw,
}

/// Query parameters accepted by the search endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub page: Option<String>,
    pub types: Option<String>,
    pub exclude_types: Option<String>,
    pub ids: Option<String>,
}

/// Request sent to the search index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub q: String,
    pub query_by: Vec<String>,
    pub query_by_weights: Vec<u32>,
    pub filter_by: Option<String>,
    pub sort_by: String,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl SearchParams {
    /// Translates caller parameters into a [`SearchRequest`].
    ///
    /// # Errors
    ///
    /// [`Error::BadRequest`] when `q` is missing or `page` is not a positive
    /// integer.
    pub fn into_request(self, mode: SearchMode) -> Result<SearchRequest> {
        let q = self
            .q
            .filter(|q| !q.is_empty())
            .ok_or_else(|| Error::BadRequest("Missing required parameter `q`".to_string()))?;

        let page = match self.page.as_deref().map(str::trim) {
            None | Some("") => 1,
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|page| *page > 0)
                .ok_or_else(|| {
                    Error::BadRequest(format!("Invalid page number `{}`", raw))
                })?,
        };

        // The UI search takes only `q` and `page`.
        let filter = match mode {
            SearchMode::Ui => Filter::default(),
            SearchMode::Raw => Filter {
                types: split_list(self.types.as_deref()),
                exclude_types: split_list(self.exclude_types.as_deref()),
                ids: split_list(self.ids.as_deref()),
            },
        };

        Ok(SearchRequest {
            q,
            query_by: QUERY_BY.iter().map(|f| f.to_string()).collect(),
            query_by_weights: QUERY_BY_WEIGHTS.to_vec(),
            filter_by: filter.render(),
            sort_by: SORT_BY.to_string(),
            page: Some(page),
            per_page: match mode {
                SearchMode::Ui => Some(UI_PER_PAGE),
                SearchMode::Raw => None,
            },
        })
    }
}

impl SearchRequest {
    /// Encodes the request as query-string pairs for the search index.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("q", self.q.clone()),
            ("query_by", self.query_by.join(",")),
            (
                "query_by_weights",
                self.query_by_weights
                    .iter()
                    .map(|w| w.to_string())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            ("sort_by", self.sort_by.clone()),
        ];
        if let Some(filter_by) = &self.filter_by {
            pairs.push(("filter_by", filter_by.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page", per_page.to_string()));
        }
        pairs
    }
}

/// Inclusion/exclusion constraints on indexed documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub types: Vec<String>,
    pub exclude_types: Vec<String>,
    pub ids: Vec<String>,
}

impl Filter {
    /// Renders the conjunction of every present constraint, or `None`.
    pub fn render(&self) -> Option<String> {
        let clauses: Vec<String> = [
            ("type", "=", &self.types),
            ("type", "!=", &self.exclude_types),
            ("id", "=", &self.ids),
        ]
        .into_iter()
        .filter(|(_, _, values)| !values.is_empty())
        .map(|(field, op, values)| format!("{}:{}[{}]", field, op, quote_values(values)))
        .collect();

        if clauses.is_empty() {
            None
        } else {
            Some(clauses.join(" && "))
        }
    }
}

/// Backtick-quotes values so commas and colons inside them survive.
fn quote_values(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("`{}`", v.replace('`', "")))
        .collect::<Vec<_>>()
        .join(",")
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|raw| {
        raw.split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
