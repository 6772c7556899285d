use chrono::{Days, Months, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::db::Data;
use crate::models::{Appointment, AppointmentStatus};

const TOP_SERVICES: usize = 5;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub revenue_today: f64,
    pub revenue_week: f64,
    pub revenue_month: f64,
    pub completed_today: usize,
    pub active_week: usize,
    pub total_appointments: usize,
    pub total_clients: usize,
    pub total_cars: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailyCount {
    pub date: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ServiceCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCharts {
    pub daily: Vec<DailyCount>,
    pub top_services: Vec<ServiceCount>,
}

/// Revenue counts completed appointments only. The week and month windows
/// start at midnight seven days / one month before today and are open-ended.
pub fn stats(data: &Data, now: NaiveDateTime) -> DashboardStats {
    let today = now.date();
    let week_ago = midnight(today.checked_sub_days(Days::new(7)).unwrap_or(today));
    let month_ago = midnight(today.checked_sub_months(Months::new(1)).unwrap_or(today));

    let completed: Vec<&Appointment> = data
        .appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::Completed)
        .collect();

    DashboardStats {
        revenue_today: revenue(&completed, |a| a.date_time.date() == today),
        revenue_week: revenue(&completed, |a| a.date_time >= week_ago),
        revenue_month: revenue(&completed, |a| a.date_time >= month_ago),
        completed_today: completed.iter().filter(|a| a.date_time.date() == today).count(),
        active_week: data
            .appointments
            .iter()
            .filter(|a| a.date_time >= week_ago && a.status != AppointmentStatus::Cancelled)
            .count(),
        total_appointments: data.appointments.len(),
        total_clients: data.clients.len(),
        total_cars: data.cars.len(),
    }
}

/// Appointment counts for the last seven days and the most booked services.
pub fn charts(data: &Data, today: NaiveDate) -> DashboardCharts {
    let daily = (0..7u64)
        .rev()
        .filter_map(|back| today.checked_sub_days(Days::new(back)))
        .map(|day| DailyCount {
            date: day.format("%d.%m").to_string(),
            count: data
                .appointments
                .iter()
                .filter(|a| a.date_time.date() == day)
                .count(),
        })
        .collect();

    // first-seen order breaks ties
    let mut counts: Vec<ServiceCount> = Vec::new();
    for appt in &data.appointments {
        let Some(service) = appt
            .service_id
            .and_then(|id| data.services.iter().find(|s| s.id == id))
        else {
            continue;
        };
        match counts.iter_mut().find(|c| c.name == service.name) {
            Some(entry) => entry.count += 1,
            None => counts.push(ServiceCount {
                name: service.name.clone(),
                count: 1,
            }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(TOP_SERVICES);

    DashboardCharts {
        daily,
        top_services: counts,
    }
}

fn revenue(completed: &[&Appointment], pred: impl Fn(&Appointment) -> bool) -> f64 {
    completed.iter().filter(|a| pred(**a)).map(|a| a.price).sum()
}

fn midnight(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::default())
}
