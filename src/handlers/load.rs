use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use chrono::Local;
use serde::Deserialize;

use super::{param, parse_date};
use crate::errors::AppError;
use crate::services::load_grid::{build_load_grid, LocationLoad};
use crate::state::AppState;

// GET /api/load-dashboard
#[derive(Debug, Deserialize)]
pub struct LoadQuery {
    pub date: Option<String>,
}

pub async fn load_dashboard(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LoadQuery>,
) -> Result<Json<Vec<LocationLoad>>, AppError> {
    let date = match param(query.date) {
        Some(raw) => parse_date("date", &raw)?,
        None => Local::now().date_naive(),
    };

    let store = state.store();
    Ok(Json(build_load_grid(store.data(), date)))
}
