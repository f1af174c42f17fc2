//! Persistence interface for the reservation engine
//!
//! The engine never talks to the database directly; it is handed an
//! implementation of [`ReservationStore`] at construction time. The
//! production implementation is [`PgStore`], tests inject a
//! [`MemoryStore`].

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::error::Error;
use crate::models::{
	Amenity,
	NewReservation,
	Reservation,
	ReservationState,
	SimpleProfile,
};

mod memory;
mod pg;

pub use memory::MemoryStore;
pub use pg::PgStore;

/// The queries and mutations the reservation engine issues
#[async_trait]
pub trait ReservationStore: Send + Sync {
	/// Look up an amenity by id
	async fn find_amenity(
		&self,
		amenity_id: i32,
	) -> Result<Option<Amenity>, Error>;

	/// Count the confirmed reservations for an amenity overlapping
	/// `[start_time, end_time)`
	async fn count_overlapping_confirmed(
		&self,
		amenity_id: i32,
		start_time: NaiveDateTime,
		end_time: NaiveDateTime,
	) -> Result<i64, Error>;

	/// Find a confirmed reservation of a profile, for any amenity,
	/// overlapping `[start_time, end_time)`
	async fn find_overlapping_confirmed_for_profile(
		&self,
		profile_id: i32,
		start_time: NaiveDateTime,
		end_time: NaiveDateTime,
	) -> Result<Option<Reservation>, Error>;

	/// Find a confirmed reservation of a profile for one amenity starting
	/// within `[day_start, day_end]`
	async fn find_same_day_confirmed(
		&self,
		profile_id: i32,
		amenity_id: i32,
		day_start: NaiveDateTime,
		day_end: NaiveDateTime,
	) -> Result<Option<Reservation>, Error>;

	/// Look up a reservation by id
	async fn find_reservation(
		&self,
		reservation_id: i32,
	) -> Result<Option<Reservation>, Error>;

	/// Insert a new reservation and return the stored record
	async fn insert_reservation(
		&self,
		new: NewReservation,
	) -> Result<Reservation, Error>;

	/// Set the lifecycle state of a reservation
	async fn set_reservation_state(
		&self,
		reservation_id: i32,
		state: ReservationState,
	) -> Result<Reservation, Error>;

	/// Set the user-visibility flag of a reservation
	async fn set_reservation_hidden(
		&self,
		reservation_id: i32,
		hidden: bool,
	) -> Result<Reservation, Error>;

	/// All non-hidden reservations of a profile with their amenities,
	/// ordered by start time
	async fn reservations_for_profile(
		&self,
		profile_id: i32,
	) -> Result<Vec<(Reservation, Amenity)>, Error>;

	/// Confirmed reservations of an amenity with the public display fields
	/// of their owners, ordered by start time, optionally restricted to a
	/// start-time window
	async fn reservations_for_amenity(
		&self,
		amenity_id: i32,
		window: Option<(NaiveDateTime, NaiveDateTime)>,
	) -> Result<Vec<(Reservation, SimpleProfile)>, Error>;
}
