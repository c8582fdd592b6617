pub mod article;
pub mod day_trip;
