use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use super::timestamp;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    #[serde(with = "timestamp")]
    pub date_time: NaiveDateTime,
    #[serde(default)]
    pub client_id: Option<i64>,
    #[serde(default)]
    pub car_id: Option<i64>,
    #[serde(default)]
    pub service_id: Option<i64>,
    #[serde(default)]
    pub employee_id: Option<i64>,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub wash_bay_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    /// Pending and confirmed appointments hold their bay.
    pub fn is_active(&self) -> bool {
        matches!(self, AppointmentStatus::Pending | AppointmentStatus::Confirmed)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Completed | AppointmentStatus::Cancelled)
    }

    /// Legal moves: pending -> confirmed -> completed, and pending|confirmed -> cancelled.
    /// Re-asserting the current status is always accepted.
    pub fn can_transition_to(&self, to: AppointmentStatus) -> bool {
        use AppointmentStatus::*;

        if *self == to {
            return true;
        }
        if self.is_terminal() {
            return false;
        }
        matches!(
            (*self, to),
            (Pending, Confirmed) | (Confirmed, Completed) | (_, Cancelled)
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Booking request body for `POST /api/appointments`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub date_time: Option<NaiveDateTime>,
    pub client_id: Option<i64>,
    pub car_id: Option<i64>,
    pub service_id: Option<i64>,
    pub employee_id: Option<i64>,
    pub status: Option<AppointmentStatus>,
    pub price: Option<f64>,
    pub comment: Option<String>,
    pub wash_bay_id: Option<i64>,
}

/// Partial update for `PUT /api/appointments/:id`. Absent fields are left as
/// they are; an explicit `null` clears a reference.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPatch {
    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub date_time: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "nullable")]
    pub client_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub car_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub service_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "nullable")]
    pub employee_id: Option<Option<i64>>,
    pub status: Option<AppointmentStatus>,
    pub price: Option<f64>,
    pub comment: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub wash_bay_id: Option<Option<i64>>,
}
