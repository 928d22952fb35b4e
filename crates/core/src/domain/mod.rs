pub mod bike;
pub mod booking;
pub mod location;
