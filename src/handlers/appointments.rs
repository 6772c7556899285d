use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Local;
use serde::Deserialize;

use super::{param, parse_date, parse_id};
use crate::errors::AppError;
use crate::models::{Appointment, AppointmentPatch, NewAppointment};
use crate::services::appointments::{self, AppointmentFilter, RECENT_LIMIT};
use crate::state::AppState;

// GET /api/appointments
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub status: Option<String>,
    pub car_wash_id: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl ListQuery {
    fn into_filter(self) -> Result<AppointmentFilter, AppError> {
        Ok(AppointmentFilter {
            status: param(self.status),
            car_wash_id: param(self.car_wash_id)
                .map(|raw| parse_id("carWashId", &raw))
                .transpose()?,
            date_from: param(self.date_from)
                .map(|raw| parse_date("dateFrom", &raw))
                .transpose()?,
            date_to: param(self.date_to)
                .map(|raw| parse_date("dateTo", &raw))
                .transpose()?,
        })
    }
}

pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let filter = query.into_filter()?;
    let store = state.store();
    Ok(Json(appointments::list(store.data(), &filter)))
}

// GET /api/appointments/recent
#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<usize>,
}

pub async fn recent_appointments(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecentQuery>,
) -> Json<Vec<Appointment>> {
    let limit = query.limit.unwrap_or(RECENT_LIMIT);
    let store = state.store();
    Json(appointments::recent(store.data(), limit))
}

// POST /api/appointments
pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewAppointment>,
) -> Result<Json<Appointment>, AppError> {
    let rules = state.config.booking_rules();
    let now = Local::now().naive_local();

    let created = state
        .store()
        .mutate(|data| appointments::create(data, rules, body, now))?;
    Ok(Json(created))
}

// PUT /api/appointments/:id
pub async fn update_appointment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(body): Json<AppointmentPatch>,
) -> Result<Json<Appointment>, AppError> {
    let rules = state.config.booking_rules();
    let updated = state
        .store()
        .mutate(|data| appointments::update(data, rules, id, body))?;
    Ok(Json(updated))
}

// DELETE /api/appointments/:id
pub async fn delete_appointment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>, AppError> {
    state
        .store()
        .mutate(|data| appointments::delete(data, id))?;
    Ok(Json(serde_json::json!({ "success": true })))
}
