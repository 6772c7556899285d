use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::errors::AppError;
use crate::models::{CarWash, CarWashInput};
use crate::services::locations;
use crate::state::AppState;

// GET /api/carwashes
pub async fn list_carwashes(State(state): State<Arc<AppState>>) -> Json<Vec<CarWash>> {
    let store = state.store();
    Json(store.data().carwashes.clone())
}

// POST /api/carwashes
pub async fn create_carwash(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CarWashInput>,
) -> Result<Json<CarWash>, AppError> {
    let carwash = state
        .store()
        .mutate(|data| Ok(locations::create_carwash(data, body)))?;
    Ok(Json(carwash))
}

// PUT /api/carwashes/:id
pub async fn update_carwash(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<CarWashInput>,
) -> Result<Json<CarWash>, AppError> {
    let carwash = state
        .store()
        .mutate(|data| locations::update_carwash(data, id, body))?;
    Ok(Json(carwash))
}

// DELETE /api/carwashes/:id
pub async fn delete_carwash(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .store()
        .mutate(|data| locations::delete_carwash(data, id))?;
    Ok(Json(serde_json::json!({ "success": true })))
}
