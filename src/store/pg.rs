use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::DbPool;
use crate::error::Error;
use crate::models::{
	Amenity,
	NewReservation,
	Reservation,
	ReservationState,
	SimpleProfile,
};
use crate::store::ReservationStore;

/// The Postgres-backed [`ReservationStore`]
///
/// Delegates to the model query methods over a pooled connection; every
/// call re-reads current state, nothing is cached
#[derive(Clone)]
pub struct PgStore {
	pool: DbPool,
}

impl PgStore {
	#[must_use]
	pub fn new(pool: DbPool) -> Self { Self { pool } }
}

#[async_trait]
impl ReservationStore for PgStore {
	async fn find_amenity(
		&self,
		amenity_id: i32,
	) -> Result<Option<Amenity>, Error> {
		let conn = self.pool.get().await?;

		Amenity::get_opt(amenity_id, &conn).await
	}

	async fn count_overlapping_confirmed(
		&self,
		amenity_id: i32,
		start_time: NaiveDateTime,
		end_time: NaiveDateTime,
	) -> Result<i64, Error> {
		let conn = self.pool.get().await?;

		Reservation::count_overlapping_confirmed(
			amenity_id, start_time, end_time, &conn,
		)
		.await
	}

	async fn find_overlapping_confirmed_for_profile(
		&self,
		profile_id: i32,
		start_time: NaiveDateTime,
		end_time: NaiveDateTime,
	) -> Result<Option<Reservation>, Error> {
		let conn = self.pool.get().await?;

		Reservation::find_overlapping_confirmed_for_profile(
			profile_id, start_time, end_time, &conn,
		)
		.await
	}

	async fn find_same_day_confirmed(
		&self,
		profile_id: i32,
		amenity_id: i32,
		day_start: NaiveDateTime,
		day_end: NaiveDateTime,
	) -> Result<Option<Reservation>, Error> {
		let conn = self.pool.get().await?;

		Reservation::find_same_day_confirmed(
			profile_id, amenity_id, day_start, day_end, &conn,
		)
		.await
	}

	async fn find_reservation(
		&self,
		reservation_id: i32,
	) -> Result<Option<Reservation>, Error> {
		let conn = self.pool.get().await?;

		Reservation::get_opt(reservation_id, &conn).await
	}

	async fn insert_reservation(
		&self,
		new: NewReservation,
	) -> Result<Reservation, Error> {
		let conn = self.pool.get().await?;

		new.insert(&conn).await
	}

	async fn set_reservation_state(
		&self,
		reservation_id: i32,
		state: ReservationState,
	) -> Result<Reservation, Error> {
		let conn = self.pool.get().await?;

		Reservation::set_state(reservation_id, state, &conn).await
	}

	async fn set_reservation_hidden(
		&self,
		reservation_id: i32,
		hidden: bool,
	) -> Result<Reservation, Error> {
		let conn = self.pool.get().await?;

		Reservation::set_hidden(reservation_id, hidden, &conn).await
	}

	async fn reservations_for_profile(
		&self,
		profile_id: i32,
	) -> Result<Vec<(Reservation, Amenity)>, Error> {
		let conn = self.pool.get().await?;

		Reservation::for_profile(profile_id, &conn).await
	}

	async fn reservations_for_amenity(
		&self,
		amenity_id: i32,
		window: Option<(NaiveDateTime, NaiveDateTime)>,
	) -> Result<Vec<(Reservation, SimpleProfile)>, Error> {
		let conn = self.pool.get().await?;

		Reservation::for_amenity(amenity_id, window, &conn).await
	}
}
