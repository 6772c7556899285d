use chrono::NaiveDateTime;

use crate::db::Data;
use crate::errors::AppError;
use crate::models::WashBay;
use crate::services::overlap::Window;

pub const BAY_NOT_FOUND: &str = "Моечное место не найдено";

/// Active bays at `car_wash_id` with no pending or confirmed appointment
/// overlapping `[target, target + 1h)`, in store order.
pub fn find_available_bays(data: &Data, car_wash_id: i64, target: NaiveDateTime) -> Vec<WashBay> {
    if !data.carwashes.iter().any(|cw| cw.id == car_wash_id) {
        return Vec::new();
    }

    let window = Window::for_appointment(target);

    data.washbays
        .iter()
        .filter(|bay| bay.is_active && bay.car_wash_id == Some(car_wash_id))
        .filter(|bay| first_conflict(data, bay.id, &window, None).is_none())
        .cloned()
        .collect()
}

/// Used when booking inside the store lock: the bay must exist, be active and
/// have no active appointment (other than `exclude`) overlapping `window`.
pub fn check_bay_free(
    data: &Data,
    bay_id: i64,
    window: &Window,
    exclude: Option<i64>,
) -> Result<(), AppError> {
    let bay = data
        .washbays
        .iter()
        .find(|b| b.id == bay_id)
        .ok_or_else(|| AppError::NotFound(BAY_NOT_FOUND.to_string()))?;

    if !bay.is_active {
        return Err(AppError::Conflict(format!(
            "Моечное место «{}» не работает",
            bay.name
        )));
    }

    if let Some(conflict) = first_conflict(data, bay_id, window, exclude) {
        tracing::warn!(
            bay_id,
            conflicting_appointment = conflict,
            start = %window.start,
            "bay already booked"
        );
        return Err(AppError::Conflict(format!(
            "Моечное место «{}» уже занято на это время",
            bay.name
        )));
    }

    Ok(())
}

fn first_conflict(data: &Data, bay_id: i64, window: &Window, exclude: Option<i64>) -> Option<i64> {
    data.appointments
        .iter()
        .filter(|a| a.wash_bay_id == Some(bay_id) && a.status.is_active())
        .filter(|a| Some(a.id) != exclude)
        .find(|a| Window::for_appointment(a.date_time).overlaps(window))
        .map(|a| a.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Appointment, AppointmentStatus, CarWash};

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn carwash(id: i64) -> CarWash {
        CarWash {
            id,
            name: format!("Location {id}"),
            address: String::new(),
            is_active: true,
        }
    }

    fn bay(id: i64, car_wash_id: i64, is_active: bool) -> WashBay {
        WashBay {
            id,
            car_wash_id: Some(car_wash_id),
            name: format!("Bay {id}"),
            description: String::new(),
            is_active,
        }
    }

    fn appt(id: i64, bay_id: i64, at: &str, status: AppointmentStatus) -> Appointment {
        Appointment {
            id,
            date_time: dt(at),
            client_id: None,
            car_id: None,
            service_id: None,
            employee_id: None,
            status,
            price: 0.0,
            comment: String::new(),
            wash_bay_id: Some(bay_id),
        }
    }

    fn ids(bays: &[WashBay]) -> Vec<i64> {
        bays.iter().map(|b| b.id).collect()
    }

    fn sample() -> Data {
        Data {
            carwashes: vec![carwash(1), carwash(2)],
            washbays: vec![bay(1, 1, true), bay(2, 1, true), bay(3, 2, true)],
            appointments: vec![appt(1, 1, "2024-01-01 10:00", AppointmentStatus::Confirmed)],
            ..Data::default()
        }
    }

    #[test]
    fn test_overlapping_booking_excludes_bay() {
        let data = sample();
        let free = find_available_bays(&data, 1, dt("2024-01-01 10:30"));
        assert_eq!(ids(&free), vec![2]);
    }

    #[test]
    fn test_half_open_boundary_frees_bay() {
        let data = sample();
        let free = find_available_bays(&data, 1, dt("2024-01-01 11:00"));
        assert_eq!(ids(&free), vec![1, 2]);
    }

    #[test]
    fn test_window_starting_before_booking_conflicts() {
        let data = sample();
        let free = find_available_bays(&data, 1, dt("2024-01-01 09:30"));
        assert_eq!(ids(&free), vec![2]);
    }

    #[test]
    fn test_cancelled_and_completed_do_not_block() {
        let mut data = sample();
        data.appointments[0].status = AppointmentStatus::Cancelled;
        assert_eq!(ids(&find_available_bays(&data, 1, dt("2024-01-01 10:00"))), vec![1, 2]);

        data.appointments[0].status = AppointmentStatus::Completed;
        assert_eq!(ids(&find_available_bays(&data, 1, dt("2024-01-01 10:00"))), vec![1, 2]);
    }

    #[test]
    fn test_pending_blocks() {
        let mut data = sample();
        data.appointments[0].status = AppointmentStatus::Pending;
        assert_eq!(ids(&find_available_bays(&data, 1, dt("2024-01-01 10:00"))), vec![2]);
    }

    #[test]
    fn test_inactive_bay_never_available() {
        let mut data = sample();
        data.washbays[1].is_active = false;
        assert_eq!(ids(&find_available_bays(&data, 1, dt("2024-01-01 15:00"))), vec![1]);
    }

    #[test]
    fn test_unknown_location_is_empty() {
        let data = sample();
        assert!(find_available_bays(&data, 99, dt("2024-01-01 15:00")).is_empty());
    }

    #[test]
    fn test_bay_without_appointments_always_free() {
        let data = sample();
        for at in ["2024-01-01 00:00", "2024-01-01 10:00", "2030-12-31 23:59"] {
            assert_eq!(ids(&find_available_bays(&data, 2, dt(at))), vec![3]);
        }
    }

    #[test]
    fn test_check_bay_free_excludes_self() {
        let data = sample();
        let window = Window::for_appointment(dt("2024-01-01 10:30"));
        assert!(matches!(
            check_bay_free(&data, 1, &window, None),
            Err(AppError::Conflict(_))
        ));
        assert!(check_bay_free(&data, 1, &window, Some(1)).is_ok());
    }

    #[test]
    fn test_check_bay_free_unknown_and_inactive() {
        let mut data = sample();
        let window = Window::for_appointment(dt("2024-01-01 15:00"));
        assert!(matches!(
            check_bay_free(&data, 42, &window, None),
            Err(AppError::NotFound(_))
        ));

        data.washbays[2].is_active = false;
        assert!(matches!(
            check_bay_free(&data, 3, &window, None),
            Err(AppError::Conflict(_))
        ));
    }
}
