pub mod appointments;
pub mod availability;
pub mod dashboard;
pub mod load_grid;
pub mod locations;
pub mod overlap;
pub mod search;
