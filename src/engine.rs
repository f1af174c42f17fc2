//! Reservation admission engine
//!
//! Decides whether a proposed booking may be stored, given the current
//! state of the reservation table, and owns the lifecycle transitions of
//! existing reservations. All rules only ever consider `Confirmed` rows;
//! cancelled reservations never block a new booking.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use parking_lot::Mutex;

use crate::error::{CreateReservationError, Error};
use crate::models::{
	Amenity,
	NewReservation,
	Reservation,
	ReservationState,
	SimpleProfile,
};
use crate::store::ReservationStore;

/// A booking request as it enters the engine: the caller, amenity, and
/// half-open window `[start_time, end_time)` have already been parsed
#[derive(Clone, Copy, Debug)]
pub struct ProposedReservation {
	pub amenity_id: i32,
	pub start_time: NaiveDateTime,
	pub end_time:   NaiveDateTime,
}

/// The reservation admission engine
///
/// Holds the injected [`ReservationStore`] and a per-amenity lock table.
/// The conflict checks and the insert of [`propose`](Self::propose) run
/// under the amenity's lock, so two concurrent proposals for one amenity
/// cannot both pass the capacity count before either row exists.
#[derive(Clone)]
pub struct ReservationEngine {
	store: Arc<dyn ReservationStore>,
	gates: Arc<Mutex<HashMap<i32, Arc<tokio::sync::Mutex<()>>>>>,
}

impl ReservationEngine {
	#[must_use]
	pub fn new(store: Arc<dyn ReservationStore>) -> Self {
		Self { store, gates: Arc::new(Mutex::new(HashMap::new())) }
	}

	fn amenity_gate(&self, amenity_id: i32) -> Arc<tokio::sync::Mutex<()>> {
		let mut gates = self.gates.lock();

		gates.entry(amenity_id).or_default().clone()
	}

	/// Admit or reject a proposed booking
	///
	/// Checks run in order, first failure wins: amenity existence, maximum
	/// duration, window validity, cross-amenity overlap with the caller's
	/// own confirmed reservations, one-visit-per-day for the amenity, and
	/// finally the capacity count. On success the reservation is stored as
	/// `Confirmed` and returned; this is the only path that creates one.
	#[instrument(skip(self))]
	pub async fn propose(
		&self,
		profile_id: i32,
		proposal: ProposedReservation,
	) -> Result<Reservation, Error> {
		let ProposedReservation { amenity_id, start_time, end_time } =
			proposal;

		let Some(amenity) = self.store.find_amenity(amenity_id).await? else {
			return Err(Error::NotFound(format!(
				"no amenity with id {amenity_id}"
			)));
		};

		check_duration(&amenity, start_time, end_time)?;
		check_window(start_time, end_time)?;

		let gate = self.amenity_gate(amenity_id);
		let _guard = gate.lock().await;

		if self
			.store
			.find_overlapping_confirmed_for_profile(
				profile_id, start_time, end_time,
			)
			.await?
			.is_some()
		{
			return Err(CreateReservationError::OverlapsOwnReservation.into());
		}

		let (day_start, day_end) = utc_day_bounds(start_time);

		if self
			.store
			.find_same_day_confirmed(profile_id, amenity_id, day_start, day_end)
			.await?
			.is_some()
		{
			return Err(CreateReservationError::AlreadyReservedThatDay.into());
		}

		let occupied = self
			.store
			.count_overlapping_confirmed(amenity_id, start_time, end_time)
			.await?;

		if occupied >= i64::from(amenity.capacity) {
			return Err(CreateReservationError::Full {
				capacity: amenity.capacity,
			}
			.into());
		}

		let reservation = self
			.store
			.insert_reservation(NewReservation {
				profile_id,
				amenity_id,
				start_time,
				end_time,
				state: ReservationState::Confirmed,
			})
			.await?;

		info!(
			"confirmed reservation {} for profile {} on amenity {}",
			reservation.id, profile_id, amenity_id
		);

		Ok(reservation)
	}

	/// Cancel a reservation owned by the caller
	///
	/// Idempotent: cancelling an already-cancelled reservation re-applies
	/// the same state. Never touches the visibility flag.
	#[instrument(skip(self))]
	pub async fn cancel(
		&self,
		profile_id: i32,
		reservation_id: i32,
	) -> Result<Reservation, Error> {
		let reservation =
			self.require_owned(profile_id, reservation_id).await?;

		self.store
			.set_reservation_state(reservation.id, ReservationState::Cancelled)
			.await
	}

	/// Hide a reservation from the caller's own listing
	///
	/// Never touches the lifecycle state; a hidden confirmed reservation
	/// still counts towards amenity capacity.
	#[instrument(skip(self))]
	pub async fn hide(
		&self,
		profile_id: i32,
		reservation_id: i32,
	) -> Result<Reservation, Error> {
		let reservation =
			self.require_owned(profile_id, reservation_id).await?;

		self.store.set_reservation_hidden(reservation.id, true).await
	}

	/// All non-hidden reservations of a profile, earliest start first,
	/// with their amenities
	#[instrument(skip(self))]
	pub async fn for_profile(
		&self,
		profile_id: i32,
	) -> Result<Vec<(Reservation, Amenity)>, Error> {
		self.store.reservations_for_profile(profile_id).await
	}

	/// Confirmed reservations of an amenity, earliest start first, with
	/// the public display fields of their owners
	///
	/// The optional `[start_date, end_date]` restriction is inclusive on
	/// both ends and compared against UTC calendar days
	#[instrument(skip(self))]
	pub async fn for_amenity(
		&self,
		amenity_id: i32,
		start_date: Option<NaiveDate>,
		end_date: Option<NaiveDate>,
	) -> Result<Vec<(Reservation, SimpleProfile)>, Error> {
		let window = date_window(start_date, end_date);

		self.store.reservations_for_amenity(amenity_id, window).await
	}

	async fn require_owned(
		&self,
		profile_id: i32,
		reservation_id: i32,
	) -> Result<Reservation, Error> {
		let Some(reservation) =
			self.store.find_reservation(reservation_id).await?
		else {
			return Err(Error::NotFound(format!(
				"no reservation with id {reservation_id}"
			)));
		};

		if reservation.profile_id != profile_id {
			return Err(Error::Forbidden);
		}

		Ok(reservation)
	}
}

/// Check that the window does not exceed the amenity's maximum duration
fn check_duration(
	amenity: &Amenity,
	start_time: NaiveDateTime,
	end_time: NaiveDateTime,
) -> Result<(), CreateReservationError> {
	let minutes = (end_time - start_time).num_minutes();

	if minutes > i64::from(amenity.max_duration_minutes) {
		return Err(CreateReservationError::TooLong {
			amenity:     amenity.name.clone(),
			max_minutes: amenity.max_duration_minutes,
		});
	}

	Ok(())
}

/// Check that the window starts strictly before it ends
fn check_window(
	start_time: NaiveDateTime,
	end_time: NaiveDateTime,
) -> Result<(), CreateReservationError> {
	if start_time >= end_time {
		return Err(CreateReservationError::InvalidTimeRange);
	}

	Ok(())
}

/// The first and last representable instant of the UTC calendar day
/// containing `at`
fn utc_day_bounds(at: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
	let day_start = at.date().and_time(NaiveTime::MIN);
	let day_end =
		day_start + TimeDelta::days(1) - TimeDelta::milliseconds(1);

	(day_start, day_end)
}

/// Convert an inclusive calendar-day range into a start-time window
fn date_window(
	start_date: Option<NaiveDate>,
	end_date: Option<NaiveDate>,
) -> Option<(NaiveDateTime, NaiveDateTime)> {
	if start_date.is_none() && end_date.is_none() {
		return None;
	}

	let from = start_date
		.map_or(NaiveDateTime::MIN, |d| d.and_time(NaiveTime::MIN));
	let until = end_date.map_or(NaiveDateTime::MAX, |d| {
		utc_day_bounds(d.and_time(NaiveTime::MIN)).1
	});

	Some((from, until))
}
