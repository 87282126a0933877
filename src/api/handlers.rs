use axum::{
    Json,
    extract::{Query, State},
};
use std::sync::Arc;

use crate::data_models::SearchResponse;
use crate::error::LeadGenError;
use crate::orchestrator::LeadFinder;

use super::models::{SearchParams, StatusMessage};

pub async fn root_handler() -> Json<StatusMessage> {
    Json(StatusMessage {
        message: "LeadGen API is running",
    })
}

pub async fn search_handler(
    State(lead_finder): State<Arc<LeadFinder>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<SearchResponse>, LeadGenError> {
    let query = SearchParams::from_pairs(pairs).query.unwrap_or_default();
    let response = lead_finder.find_leads(&query).await?;
    Ok(Json(response))
}
