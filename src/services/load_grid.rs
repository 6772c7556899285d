use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use crate::db::Data;
use crate::models::{Appointment, AppointmentStatus, WashBay};
use crate::services::overlap::Window;

/// First and last bookable hour shown on the grid (08:00..=21:00).
pub const FIRST_HOUR: u32 = 8;
pub const LAST_HOUR: u32 = 21;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocationLoad {
    pub car_wash_id: i64,
    pub car_wash_name: String,
    pub schedule: Vec<BayLoad>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BayLoad {
    pub bay_id: i64,
    pub bay_name: String,
    pub slots: Vec<Slot>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub hour: String,
    pub appointment_id: Option<i64>,
    pub status: SlotStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Free,
    Booked(AppointmentStatus),
}

impl SlotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotStatus::Free => "free",
            SlotStatus::Booked(status) => status.as_str(),
        }
    }
}

impl Serialize for SlotStatus {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Hourly occupancy of every bay at every location on `date`.
pub fn build_load_grid(data: &Data, date: NaiveDate) -> Vec<LocationLoad> {
    data.carwashes
        .iter()
        .map(|carwash| LocationLoad {
            car_wash_id: carwash.id,
            car_wash_name: carwash.name.clone(),
            schedule: data
                .washbays
                .iter()
                .filter(|bay| bay.car_wash_id == Some(carwash.id))
                .map(|bay| bay_load(data, bay, date))
                .collect(),
        })
        .collect()
}

fn bay_load(data: &Data, bay: &WashBay, date: NaiveDate) -> BayLoad {
    let slots = (FIRST_HOUR..=LAST_HOUR)
        .filter_map(|hour| NaiveTime::from_hms_opt(hour, 0, 0).map(|t| (hour, t)))
        .map(|(hour, time)| {
            let window = Window::for_appointment(date.and_time(time));
            let found = slot_occupant(data, bay.id, &window);
            Slot {
                hour: format!("{hour}:00"),
                appointment_id: found.map(|a| a.id),
                status: found.map_or(SlotStatus::Free, |a| SlotStatus::Booked(a.status)),
            }
        })
        .collect();

    BayLoad {
        bay_id: bay.id,
        bay_name: bay.name.clone(),
        slots,
    }
}

// Double bookings are possible in legacy data; the first match in store order wins.
fn slot_occupant<'a>(data: &'a Data, bay_id: i64, window: &Window) -> Option<&'a Appointment> {
    data.appointments.iter().find(|a| {
        a.wash_bay_id == Some(bay_id)
            && a.status != AppointmentStatus::Cancelled
            && Window::for_appointment(a.date_time).overlaps(window)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    use crate::models::CarWash;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn carwash(id: i64, name: &str) -> CarWash {
        CarWash {
            id,
            name: name.to_string(),
            address: String::new(),
            is_active: true,
        }
    }

    fn bay(id: i64, car_wash_id: i64) -> WashBay {
        WashBay {
            id,
            car_wash_id: Some(car_wash_id),
            name: format!("Bay {id}"),
            description: String::new(),
            is_active: true,
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

    fn sample() -> Data {
        Data {
            carwashes: vec![carwash(1, "Main"), carwash(2, "North"), carwash(3, "Empty")],
            washbays: vec![bay(10, 1), bay(20, 2), bay(11, 1)],
            ..Data::default()
        }
    }

    #[test]
    fn test_grid_shape() {
        let grid = build_load_grid(&sample(), day());
        assert_eq!(grid.len(), 3);

        let main = &grid[0];
        assert_eq!(main.car_wash_name, "Main");
        let bay_ids: Vec<i64> = main.schedule.iter().map(|b| b.bay_id).collect();
        assert_eq!(bay_ids, vec![10, 11]);
        assert_eq!(grid[1].schedule.len(), 1);
        assert!(grid[2].schedule.is_empty());

        for bay in grid.iter().flat_map(|l| &l.schedule) {
            assert_eq!(bay.slots.len(), 14);
            assert_eq!(bay.slots[0].hour, "8:00");
            assert_eq!(bay.slots[13].hour, "21:00");
        }
    }

    #[test]
    fn test_empty_day_is_all_free() {
        let grid = build_load_grid(&sample(), day());
        for slot in grid.iter().flat_map(|l| &l.schedule).flat_map(|b| &b.slots) {
            assert_eq!(slot.status, SlotStatus::Free);
            assert_eq!(slot.appointment_id, None);
        }
    }

    #[test]
    fn test_booking_marks_overlapping_slots() {
        let mut data = sample();
        data.appointments.push(appt(5, 10, "2024-01-01 10:30", AppointmentStatus::Confirmed));

        let grid = build_load_grid(&data, day());
        let slots = &grid[0].schedule[0].slots;
        // 10:30-11:30 touches the 10:00 and 11:00 slots
        assert_eq!(slots[2].appointment_id, Some(5));
        assert_eq!(slots[2].status, SlotStatus::Booked(AppointmentStatus::Confirmed));
        assert_eq!(slots[3].appointment_id, Some(5));
        assert_eq!(slots[1].appointment_id, None);
        assert_eq!(slots[4].appointment_id, None);
        // other bay untouched
        assert!(grid[0].schedule[1].slots.iter().all(|s| s.appointment_id.is_none()));
    }

    #[test]
    fn test_cancelled_ignored_completed_shown() {
        let mut data = sample();
        data.appointments.push(appt(1, 10, "2024-01-01 09:00", AppointmentStatus::Cancelled));
        data.appointments.push(appt(2, 10, "2024-01-01 12:00", AppointmentStatus::Completed));

        let slots = &build_load_grid(&data, day())[0].schedule[0].slots;
        assert_eq!(slots[1].status, SlotStatus::Free);
        assert_eq!(slots[4].status, SlotStatus::Booked(AppointmentStatus::Completed));
    }

    #[test]
    fn test_first_found_wins_on_double_booking() {
        let mut data = sample();
        data.appointments.push(appt(7, 10, "2024-01-01 14:00", AppointmentStatus::Pending));
        data.appointments.push(appt(8, 10, "2024-01-01 14:00", AppointmentStatus::Confirmed));

        let slots = &build_load_grid(&data, day())[0].schedule[0].slots;
        assert_eq!(slots[6].appointment_id, Some(7));
        assert_eq!(slots[6].status.as_str(), "pending");
    }

    #[test]
    fn test_other_days_ignored() {
        let mut data = sample();
        data.appointments.push(appt(3, 10, "2024-01-02 10:00", AppointmentStatus::Pending));
        let grid = build_load_grid(&data, day());
        assert!(grid[0].schedule[0].slots.iter().all(|s| s.appointment_id.is_none()));
    }

    #[test]
    fn test_serialized_shape() {
        let mut data = sample();
        data.appointments.push(appt(5, 10, "2024-01-01 08:00", AppointmentStatus::Pending));
        let json = serde_json::to_value(build_load_grid(&data, day())).unwrap();
        assert_eq!(json[0]["carWashId"], 1);
        assert_eq!(json[0]["schedule"][0]["bayName"], "Bay 10");
        assert_eq!(json[0]["schedule"][0]["slots"][0]["appointmentId"], 5);
        assert_eq!(json[0]["schedule"][0]["slots"][0]["status"], "pending");
        assert_eq!(json[0]["schedule"][0]["slots"][1]["appointmentId"], serde_json::Value::Null);
        assert_eq!(json[0]["schedule"][0]["slots"][1]["status"], "free");
    }
}
