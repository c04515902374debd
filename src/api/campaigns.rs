//! Campaign API endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::{created, ApiResult, Created};
use crate::models::{Campaign, CampaignDraft};
use crate::AppState;

const DEFAULT_PAGE: i64 = 1;
const DEFAULT_LIMIT: i64 = 10;

/// Raw pagination query parameters.
///
/// Kept as strings so that values like `2abc` or `3.7` can be coerced instead
/// of rejected.
#[derive(Debug, Default, Deserialize)]
pub struct CampaignListQuery {
    #[serde(default)]
    pub page: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

/// Resolved skip/limit window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
}

impl Pagination {
    pub fn from_query(query: &CampaignListQuery) -> Self {
        let page = query
            .page
            .as_deref()
            .and_then(coerce_int)
            .filter(|page| *page >= 1)
            .unwrap_or(DEFAULT_PAGE);

        let limit = query
            .limit
            .as_deref()
            .and_then(coerce_int)
            .filter(|limit| *limit >= 1)
            .unwrap_or(DEFAULT_LIMIT);

        Self { page, limit }
    }

    pub fn skip(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Parse the leading integer of a string, ignoring any trailing text.
fn coerce_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// GET /campaigns - List campaigns, newest first.
pub async fn list_campaigns(
    State(state): State<AppState>,
    query: Result<Query<CampaignListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Campaign>>> {
    // An unparsable query string behaves like an absent one
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let pagination = Pagination::from_query(&query);

    let campaigns = state
        .repo
        .list_campaigns(pagination.skip(), pagination.limit)
        .await?;
    Ok(Json(campaigns))
}

/// POST /campaigns - Create a campaign.
pub async fn create_campaign(
    State(state): State<AppState>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResult<Created> {
    let Json(body) = payload?;
    let draft = CampaignDraft::from_body(body);

    let campaign = state.repo.create_campaign(&draft).await?;
    tracing::info!(campaign_id = %campaign.id, "Campaign created");

    Ok(created("Campaign created", campaign.id))
}
