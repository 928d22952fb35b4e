//! Appointment records under the `bookings` key.

use std::sync::Arc;

use bigbike_core::{Booking, BookingDraft, BookingId, BookingStatus};
use chrono::Utc;
use tokio::sync::Mutex;

use crate::kv::{load_or_default, save, KvStore, StoreError};

const KEY: &str = "bookings";

#[derive(Clone)]
pub struct BookingStore {
    kv: Arc<dyn KvStore>,
    /// Serializes read-modify-write cycles; the record list is append-only
    /// and a concurrent submit must never drop another booking.
    write_guard: Arc<Mutex<()>>,
}

impl BookingStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv, write_guard: Arc::new(Mutex::new(())) }
    }

    /// Bookings in submission order.
    pub async fn list(&self) -> Result<Vec<Booking>, StoreError> {
        load_or_default(self.kv.as_ref(), KEY).await
    }

    /// Newest first, the order the history screen shows.
    pub async fn list_recent_first(&self) -> Result<Vec<Booking>, StoreError> {
        let mut bookings = self.list().await?;
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }

    pub async fn find(&self, id: &BookingId) -> Result<Option<Booking>, StoreError> {
        Ok(self.list().await?.into_iter().find(|booking| &booking.id == id))
    }

    /// Validates the draft and appends it as a pending booking.
    pub async fn submit(&self, draft: BookingDraft) -> Result<Booking, StoreError> {
        let booking = Booking::from_draft(draft, Utc::now())?;
        let _write = self.write_guard.lock().await;
        let mut bookings = self.list().await?;
        bookings.push(booking.clone());
        save(self.kv.as_ref(), KEY, &bookings).await?;
        Ok(booking)
    }

    pub async fn cancel(&self, id: &BookingId) -> Result<Booking, StoreError> {
        self.transition(id, BookingStatus::Cancelled).await
    }

    pub async fn confirm(&self, id: &BookingId) -> Result<Booking, StoreError> {
        self.transition(id, BookingStatus::Confirmed).await
    }

    async fn transition(&self, id: &BookingId, to: BookingStatus) -> Result<Booking, StoreError> {
        let _write = self.write_guard.lock().await;
        let mut bookings = self.list().await?;
        let booking = bookings
            .iter_mut()
            .find(|booking| &booking.id == id)
            .ok_or_else(|| bigbike_core::DomainError::UnknownBooking { id: id.to_string() })?;
        booking.transition(to)?;
        let updated = booking.clone();
        save(self.kv.as_ref(), KEY, &bookings).await?;
        Ok(updated)
    }
}
