use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::services::search::{self, SearchHit};
use crate::state::AppState;

// GET /api/search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<SearchHit>> {
    let q = query.q.unwrap_or_default();
    let store = state.store();
    Json(search::search(store.data(), &q))
}
