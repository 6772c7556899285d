use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Local;

use crate::services::dashboard::{self, DashboardCharts, DashboardStats};
use crate::state::AppState;

// GET /api/dashboard/stats
pub async fn stats(State(state): State<Arc<AppState>>) -> Json<DashboardStats> {
    let now = Local::now().naive_local();
    let store = state.store();
    Json(dashboard::stats(store.data(), now))
}

// GET /api/dashboard/charts
pub async fn charts(State(state): State<Arc<AppState>>) -> Json<DashboardCharts> {
    let today = Local::now().date_naive();
    let store = state.store();
    Json(dashboard::charts(store.data(), today))
}
