use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use parking_lot::Mutex;

use crate::error::Error;
use crate::models::{
	Amenity,
	NewReservation,
	Reservation,
	ReservationState,
	SimpleProfile,
};
use crate::store::ReservationStore;

/// An in-process [`ReservationStore`] keeping all records in memory
///
/// Backs the test suites; rows behave like their Postgres counterparts
/// (serial ids, insertion timestamps, the same filters and orderings)
#[derive(Default)]
pub struct MemoryStore {
	inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
	next_amenity_id:     i32,
	next_profile_id:     i32,
	next_reservation_id: i32,

	amenities:    BTreeMap<i32, Amenity>,
	profiles:     BTreeMap<i32, SimpleProfile>,
	reservations: BTreeMap<i32, Reservation>,
}

impl MemoryStore {
	#[must_use]
	pub fn new() -> Self { Self::default() }

	/// Register an amenity and return the stored record
	pub fn add_amenity(
		&self,
		name: &str,
		capacity: i32,
		max_duration_minutes: i32,
	) -> Amenity {
		let mut inner = self.inner.lock();

		inner.next_amenity_id += 1;
		let amenity = Amenity {
			id: inner.next_amenity_id,
			name: name.to_string(),
			description: None,
			capacity,
			max_duration_minutes,
			created_at: Utc::now().naive_utc(),
			created_by: None,
		};

		inner.amenities.insert(amenity.id, amenity.clone());

		amenity
	}

	/// Register a profile and return its public display fields
	pub fn add_profile(&self, username: &str) -> SimpleProfile {
		let mut inner = self.inner.lock();

		inner.next_profile_id += 1;
		let profile = SimpleProfile {
			id:       inner.next_profile_id,
			username: username.to_string(),
		};

		inner.profiles.insert(profile.id, profile.clone());

		profile
	}
}

fn overlaps(
	reservation: &Reservation,
	start_time: NaiveDateTime,
	end_time: NaiveDateTime,
) -> bool {
	reservation.start_time < end_time && reservation.end_time > start_time
}

#[async_trait]
impl ReservationStore for MemoryStore {
	async fn find_amenity(
		&self,
		amenity_id: i32,
	) -> Result<Option<Amenity>, Error> {
		Ok(self.inner.lock().amenities.get(&amenity_id).cloned())
	}

	async fn count_overlapping_confirmed(
		&self,
		amenity_id: i32,
		start_time: NaiveDateTime,
		end_time: NaiveDateTime,
	) -> Result<i64, Error> {
		let inner = self.inner.lock();

		let occupied = inner
			.reservations
			.values()
			.filter(|r| {
				r.amenity_id == amenity_id
					&& r.state == ReservationState::Confirmed
					&& overlaps(r, start_time, end_time)
			})
			.count();

		Ok(occupied as i64)
	}

	async fn find_overlapping_confirmed_for_profile(
		&self,
		profile_id: i32,
		start_time: NaiveDateTime,
		end_time: NaiveDateTime,
	) -> Result<Option<Reservation>, Error> {
		let inner = self.inner.lock();

		let found = inner
			.reservations
			.values()
			.find(|r| {
				r.profile_id == profile_id
					&& r.state == ReservationState::Confirmed
					&& overlaps(r, start_time, end_time)
			})
			.cloned();

		Ok(found)
	}

	async fn find_same_day_confirmed(
		&self,
		profile_id: i32,
		amenity_id: i32,
		day_start: NaiveDateTime,
		day_end: NaiveDateTime,
	) -> Result<Option<Reservation>, Error> {
		let inner = self.inner.lock();

		let found = inner
			.reservations
			.values()
			.find(|r| {
				r.profile_id == profile_id
					&& r.amenity_id == amenity_id
					&& r.state == ReservationState::Confirmed
					&& r.start_time >= day_start
					&& r.start_time <= day_end
			})
			.cloned();

		Ok(found)
	}

	async fn find_reservation(
		&self,
		reservation_id: i32,
	) -> Result<Option<Reservation>, Error> {
		Ok(self.inner.lock().reservations.get(&reservation_id).cloned())
	}

	async fn insert_reservation(
		&self,
		new: NewReservation,
	) -> Result<Reservation, Error> {
		let mut inner = self.inner.lock();

		let now = Utc::now().naive_utc();

		inner.next_reservation_id += 1;
		let reservation = Reservation {
			id: inner.next_reservation_id,
			profile_id: new.profile_id,
			amenity_id: new.amenity_id,
			start_time: new.start_time,
			end_time: new.end_time,
			state: new.state,
			hidden_from_user: false,
			created_at: now,
			updated_at: now,
		};

		inner.reservations.insert(reservation.id, reservation.clone());

		Ok(reservation)
	}

	async fn set_reservation_state(
		&self,
		reservation_id: i32,
		state: ReservationState,
	) -> Result<Reservation, Error> {
		let mut inner = self.inner.lock();

		let reservation = inner
			.reservations
			.get_mut(&reservation_id)
			.ok_or_else(|| {
				Error::NotFound(format!("reservation {reservation_id}"))
			})?;

		reservation.state = state;
		reservation.updated_at = Utc::now().naive_utc();

		Ok(reservation.clone())
	}

	async fn set_reservation_hidden(
		&self,
		reservation_id: i32,
		hidden: bool,
	) -> Result<Reservation, Error> {
		let mut inner = self.inner.lock();

		let reservation = inner
			.reservations
			.get_mut(&reservation_id)
			.ok_or_else(|| {
				Error::NotFound(format!("reservation {reservation_id}"))
			})?;

		reservation.hidden_from_user = hidden;
		reservation.updated_at = Utc::now().naive_utc();

		Ok(reservation.clone())
	}

	async fn reservations_for_profile(
		&self,
		profile_id: i32,
	) -> Result<Vec<(Reservation, Amenity)>, Error> {
		let inner = self.inner.lock();

		let mut reservations = Vec::new();

		for r in inner.reservations.values() {
			if r.profile_id != profile_id || r.hidden_from_user {
				continue;
			}

			let amenity =
				inner.amenities.get(&r.amenity_id).cloned().ok_or_else(
					|| {
						Error::Infallible(format!(
							"reservation {} references missing amenity {}",
							r.id, r.amenity_id
						))
					},
				)?;

			reservations.push((r.clone(), amenity));
		}

		reservations.sort_by_key(|(r, _)| r.start_time);

		Ok(reservations)
	}

	async fn reservations_for_amenity(
		&self,
		amenity_id: i32,
		window: Option<(NaiveDateTime, NaiveDateTime)>,
	) -> Result<Vec<(Reservation, SimpleProfile)>, Error> {
		let inner = self.inner.lock();

		let mut reservations = Vec::new();

		for r in inner.reservations.values() {
			if r.amenity_id != amenity_id
				|| r.state != ReservationState::Confirmed
			{
				continue;
			}

			if let Some((from, until)) = window
				&& (r.start_time < from || r.start_time > until)
			{
				continue;
			}

			let profile =
				inner.profiles.get(&r.profile_id).cloned().ok_or_else(
					|| {
						Error::Infallible(format!(
							"reservation {} references missing profile {}",
							r.id, r.profile_id
						))
					},
				)?;

			reservations.push((r.clone(), profile));
		}

		reservations.sort_by_key(|(r, _)| r.start_time);

		Ok(reservations)
	}
}
