use chrono::{NaiveDate, NaiveDateTime};

use crate::db::Data;
use crate::errors::AppError;
use crate::models::{next_id, Appointment, AppointmentPatch, NewAppointment};
use crate::services::availability::check_bay_free;
use crate::services::overlap::Window;

pub const NOT_FOUND: &str = "Запись не найдена";
pub const RECENT_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRules {
    /// Reject status changes outside the transition table. Off means any
    /// status may overwrite any other, as older clients expect.
    pub strict_transitions: bool,
    /// Re-check the bay inside the store lock before a booking is written.
    pub atomic_booking: bool,
}

impl Default for BookingRules {
    fn default() -> Self {
        Self {
            strict_transitions: true,
            atomic_booking: true,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppointmentFilter {
    pub status: Option<String>,
    pub car_wash_id: Option<i64>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

pub fn create(
    data: &mut Data,
    rules: BookingRules,
    req: NewAppointment,
    now: NaiveDateTime,
) -> Result<Appointment, AppError> {
    let price = validate_price(req.price.unwrap_or(0.0))?;

    let appointment = Appointment {
        id: next_id(&data.appointments),
        date_time: req.date_time.unwrap_or(now),
        client_id: req.client_id,
        car_id: req.car_id,
        service_id: req.service_id,
        employee_id: req.employee_id,
        status: req.status.unwrap_or_default(),
        price,
        comment: req.comment.unwrap_or_default(),
        wash_bay_id: req.wash_bay_id,
    };

    if rules.atomic_booking && appointment.status.is_active() {
        if let Some(bay_id) = appointment.wash_bay_id {
            check_bay_free(data, bay_id, &Window::for_appointment(appointment.date_time), None)?;
        }
    }

    data.appointments.push(appointment.clone());
    tracing::info!(
        id = appointment.id,
        bay = ?appointment.wash_bay_id,
        at = %appointment.date_time,
        "appointment created"
    );
    Ok(appointment)
}

pub fn update(
    data: &mut Data,
    rules: BookingRules,
    id: i64,
    patch: AppointmentPatch,
) -> Result<Appointment, AppError> {
    let current = data
        .appointments
        .iter()
        .find(|a| a.id == id)
        .cloned()
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.to_string()))?;

    let mut next = current.clone();
    if let Some(status) = patch.status {
        if rules.strict_transitions && !current.status.can_transition_to(status) {
            return Err(AppError::Validation(format!(
                "Недопустимый переход статуса: {} → {}",
                current.status, status
            )));
        }
        next.status = status;
    }
    if let Some(price) = patch.price {
        next.price = validate_price(price)?;
    }
    if let Some(date_time) = patch.date_time {
        next.date_time = date_time;
    }
    if let Some(comment) = patch.comment {
        next.comment = comment;
    }
    if let Some(client_id) = patch.client_id {
        next.client_id = client_id;
    }
    if let Some(car_id) = patch.car_id {
        next.car_id = car_id;
    }
    if let Some(service_id) = patch.service_id {
        next.service_id = service_id;
    }
    if let Some(employee_id) = patch.employee_id {
        next.employee_id = employee_id;
    }
    if let Some(wash_bay_id) = patch.wash_bay_id {
        next.wash_bay_id = wash_bay_id;
    }

    let moved = next.date_time != current.date_time || next.wash_bay_id != current.wash_bay_id;
    let reactivated = next.status.is_active() && !current.status.is_active();
    if rules.atomic_booking && next.status.is_active() && (moved || reactivated) {
        if let Some(bay_id) = next.wash_bay_id {
            check_bay_free(data, bay_id, &Window::for_appointment(next.date_time), Some(id))?;
        }
    }

    if let Some(slot) = data.appointments.iter_mut().find(|a| a.id == id) {
        *slot = next.clone();
    }
    if current.status != next.status {
        tracing::info!(id, from = %current.status, to = %next.status, "appointment status changed");
    }
    Ok(next)
}

pub fn delete(data: &mut Data, id: i64) -> Result<(), AppError> {
    let before = data.appointments.len();
    data.appointments.retain(|a| a.id != id);
    if data.appointments.len() == before {
        return Err(AppError::NotFound(NOT_FOUND.to_string()));
    }
    tracing::info!(id, "appointment deleted");
    Ok(())
}

pub fn list(data: &Data, filter: &AppointmentFilter) -> Vec<Appointment> {
    data.appointments
        .iter()
        .filter(|a| {
            filter
                .status
                .as_deref()
                .map_or(true, |s| a.status.as_str() == s)
        })
        .filter(|a| {
            filter
                .car_wash_id
                .map_or(true, |cw| location_of(data, a) == Some(cw))
        })
        .filter(|a| {
            let date = a.date_time.date();
            filter.date_from.map_or(true, |from| date >= from)
                && filter.date_to.map_or(true, |to| date <= to)
        })
        .cloned()
        .collect()
}

/// The `limit` latest appointments by date, newest first.
pub fn recent(data: &Data, limit: usize) -> Vec<Appointment> {
    let mut all = data.appointments.clone();
    all.sort_by(|a, b| b.date_time.cmp(&a.date_time));
    all.truncate(limit);
    all
}

fn location_of(data: &Data, appointment: &Appointment) -> Option<i64> {
    let bay_id = appointment.wash_bay_id?;
    data.washbays
        .iter()
        .find(|b| b.id == bay_id)
        .and_then(|b| b.car_wash_id)
}

fn validate_price(price: f64) -> Result<f64, AppError> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::Validation(
            "Цена должна быть неотрицательным числом".to_string(),
        ));
    }
    Ok(price)
}
