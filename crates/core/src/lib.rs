pub mod achievements;
pub mod catalog;
pub mod compare;
pub mod config;
pub mod domain;
pub mod easteregg;
pub mod errors;
pub mod geo;
pub mod showroom;

pub use achievements::{
    achievement_list, satisfied, Achievement, AchievementRule, AchievementTracker, TrackerUpdate,
};
pub use catalog::{branches, Catalog};
pub use compare::{compare, ComparisonRow, ComparisonTable, SpecField, Winner, COMPARED_FIELDS};
pub use domain::bike::{Bike, BikeId};
pub use domain::booking::{
    AppointmentKind, Booking, BookingDraft, BookingId, BookingStatus,
};
pub use domain::location::{Coordinates, Location};
pub use easteregg::KeySequenceDetector;
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use geo::{haversine_km, nearest};
pub use showroom::{filter_sort, BrandFilter, SortKey};
