pub mod postgrest;
pub mod seed;
pub mod service;
pub mod shape;
pub mod source;
pub mod sqlite;

pub use service::DayTripService;
pub use source::{DayTripFilter, DayTripSource, TripKey};
