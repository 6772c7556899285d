use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use super::param;
use crate::errors::AppError;
use crate::models::{timestamp, WashBay, WashBayInput};
use crate::services::availability::find_available_bays;
use crate::services::locations;
use crate::state::AppState;

const MISSING_AVAILABILITY_PARAMS: &str = "Необходимо указать carWashId и dateTime";

// GET /api/washbays
pub async fn list_washbays(State(state): State<Arc<AppState>>) -> Json<Vec<WashBay>> {
    let store = state.store();
    Json(store.data().washbays.clone())
}

// GET /api/washbays/available
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableQuery {
    pub car_wash_id: Option<String>,
    pub date_time: Option<String>,
}

pub async fn available_washbays(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AvailableQuery>,
) -> Result<Json<Vec<WashBay>>, AppError> {
    let (Some(raw_id), Some(raw_time)) = (param(query.car_wash_id), param(query.date_time)) else {
        return Err(AppError::Validation(MISSING_AVAILABILITY_PARAMS.to_string()));
    };
    let target = timestamp::parse(&raw_time)
        .ok_or_else(|| AppError::Validation(format!("Некорректный параметр dateTime: {raw_time}")))?;

    // an id that cannot name a location resolves to no bays
    let Ok(car_wash_id) = raw_id.parse::<i64>() else {
        return Ok(Json(Vec::new()));
    };

    let store = state.store();
    Ok(Json(find_available_bays(store.data(), car_wash_id, target)))
}

// POST /api/washbays
pub async fn create_washbay(
    State(state): State<Arc<AppState>>,
    Json(body): Json<WashBayInput>,
) -> Result<Json<WashBay>, AppError> {
    let bay = state
        .store()
        .mutate(|data| Ok(locations::create_washbay(data, body)))?;
    Ok(Json(bay))
}

// PUT /api/washbays/:id
pub async fn update_washbay(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<WashBayInput>,
) -> Result<Json<WashBay>, AppError> {
    let bay = state
        .store()
        .mutate(|data| locations::update_washbay(data, id, body))?;
    Ok(Json(bay))
}

// DELETE /api/washbays/:id
pub async fn delete_washbay(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .store()
        .mutate(|data| locations::delete_washbay(data, id))?;
    Ok(Json(serde_json::json!({ "success": true })))
}
