use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::bike::BikeId;
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(pub String);

impl BookingId {
    /// Ids carry a millisecond-epoch prefix so lexicographic order follows
    /// creation order; the uuid suffix keeps same-millisecond ids unique.
    pub fn generate(created_at: DateTime<Utc>) -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!("{}-{}", created_at.timestamp_millis(), &suffix[..8]))
    }
}

impl std::fmt::Display for BookingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AppointmentKind {
    TestRide,
    Rental,
    Purchase,
    Service,
}

impl std::str::FromStr for AppointmentKind {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "test-ride" | "test_ride" => Ok(Self::TestRide),
            "rental" => Ok(Self::Rental),
            "purchase" => Ok(Self::Purchase),
            "service" => Ok(Self::Service),
            other => Err(DomainError::InvalidBookingField {
                field: "type".to_string(),
                detail: format!("unknown appointment type `{other}`"),
            }),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// User-submitted booking form before it becomes a persisted record.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BookingDraft {
    pub name: String,
    pub phone: String,
    pub bike: BikeId,
    pub kind: AppointmentKind,
    pub date: String,
    pub time: String,
}

impl BookingDraft {
    pub fn validate(&self) -> Result<(), DomainError> {
        for (field, value) in [
            ("name", &self.name),
            ("phone", &self.phone),
            ("date", &self.date),
            ("time", &self.time),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::InvalidBookingField {
                    field: field.to_string(),
                    detail: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub name: String,
    pub phone: String,
    pub bike: BikeId,
    #[serde(rename = "type")]
    pub kind: AppointmentKind,
    pub date: String,
    pub time: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn from_draft(draft: BookingDraft, created_at: DateTime<Utc>) -> Result<Self, DomainError> {
        draft.validate()?;
        Ok(Self {
            id: BookingId::generate(created_at),
            name: draft.name,
            phone: draft.phone,
            bike: draft.bike,
            kind: draft.kind,
            date: draft.date,
            time: draft.time,
            status: BookingStatus::Pending,
            created_at,
        })
    }

    /// Only pending bookings move; confirmed and cancelled are terminal.
    pub fn transition(&mut self, to: BookingStatus) -> Result<(), DomainError> {
        match (self.status, to) {
            (BookingStatus::Pending, BookingStatus::Confirmed)
            | (BookingStatus::Pending, BookingStatus::Cancelled) => {
                self.status = to;
                Ok(())
            }
            (from, to) => Err(DomainError::InvalidBookingTransition { from, to }),
        }
    }
}
