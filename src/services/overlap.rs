use chrono::{Duration, NaiveDateTime};

/// Every appointment occupies its bay for one hour.
pub const APPOINTMENT_MINUTES: i64 = 60;

pub fn appointment_duration() -> Duration {
    Duration::minutes(APPOINTMENT_MINUTES)
}

/// Half-open intervals `[start_a, end_a)` and `[start_b, end_b)` share an instant.
pub fn overlaps<T: PartialOrd>(start_a: T, end_a: T, start_b: T, end_b: T) -> bool {
    start_a < end_b && start_b < end_a
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Window {
    pub fn for_appointment(start: NaiveDateTime) -> Self {
        Self {
            start,
            end: start + appointment_duration(),
        }
    }

    pub fn overlaps(&self, other: &Window) -> bool {
        overlaps(self.start, self.end, other.start, other.end)
    }
}
