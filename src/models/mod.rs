pub mod appointment;
pub mod directory;
pub mod location;
pub mod timestamp;

pub use appointment::{Appointment, AppointmentPatch, AppointmentStatus, NewAppointment};
pub use directory::{Car, Client, Employee, Service, Shift};
pub use location::{CarWash, CarWashInput, WashBay, WashBayInput};

/// Anything stored in one of the document's id-keyed collections.
pub trait Record {
    fn id(&self) -> i64;
}

macro_rules! impl_record {
    ($($ty:ty),* $(,)?) => {
        $(impl Record for $ty {
            fn id(&self) -> i64 {
                self.id
            }
        })*
    };
}

impl_record!(Appointment, Car, CarWash, Client, Employee, Service, Shift, WashBay);

/// Next free id in a collection: one past the current maximum.
pub fn next_id<T: Record>(items: &[T]) -> i64 {
    items.iter().map(Record::id).max().unwrap_or(0) + 1
}
