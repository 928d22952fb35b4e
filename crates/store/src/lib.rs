//! Persistence for BigBike: a string-keyed JSON backend plus one typed
//! store per persisted collection. Key names are part of the stored-data
//! contract and never change.

pub mod bookings;
pub mod flags;
pub mod kv;
pub mod viewed;
pub mod wishlist;

pub use bookings::BookingStore;
pub use flags::FlagStore;
pub use kv::{FileKvStore, KvStore, MemoryKvStore, StoreError};
pub use viewed::{ViewedChanged, ViewedStore};
pub use wishlist::WishlistStore;
