use chrono::NaiveDateTime;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

use crate::DbConn;
use crate::error::Error;
use crate::models::{Amenity, SimpleProfile};
use crate::schema::{amenity, profile, reservation};

/// The lifecycle state of a [`Reservation`]
///
/// `Pending` exists in the datastore type but is never produced by any
/// booking rule; the only transition is `Confirmed -> Cancelled`
#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::ReservationState"]
#[serde(rename_all = "camelCase")]
pub enum ReservationState {
	Pending,
	#[default]
	Confirmed,
	Cancelled,
}

/// A single booking of one amenity by one resident over `[start_time,
/// end_time)`
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = reservation)]
#[diesel(check_for_backend(Pg))]
pub struct Reservation {
	pub id:               i32,
	pub profile_id:       i32,
	pub amenity_id:       i32,
	pub start_time:       NaiveDateTime,
	pub end_time:         NaiveDateTime,
	pub state:            ReservationState,
	pub hidden_from_user: bool,
	pub created_at:       NaiveDateTime,
	pub updated_at:       NaiveDateTime,
}

impl Reservation {
	/// Get a [`Reservation`] given its id, if it exists
	#[instrument(skip(conn))]
	pub async fn get_opt(
		r_id: i32,
		conn: &DbConn,
	) -> Result<Option<Self>, Error> {
		let reservation = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				reservation
					.find(r_id)
					.select(Self::as_select())
					.get_result(conn)
					.optional()
			})
			.await??;

		Ok(reservation)
	}

	/// Find a confirmed reservation of the given profile overlapping the
	/// given window, for any amenity
	#[instrument(skip(conn))]
	pub async fn find_overlapping_confirmed_for_profile(
		p_id: i32,
		window_start: NaiveDateTime,
		window_end: NaiveDateTime,
		conn: &DbConn,
	) -> Result<Option<Self>, Error> {
		let reservation = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				reservation
					.filter(profile_id.eq(p_id))
					.filter(state.eq(ReservationState::Confirmed))
					.filter(start_time.lt(window_end))
					.filter(end_time.gt(window_start))
					.select(Self::as_select())
					.first(conn)
					.optional()
			})
			.await??;

		Ok(reservation)
	}

	/// Find a confirmed reservation of the given profile for the given
	/// amenity starting within `[day_start, day_end]`
	#[instrument(skip(conn))]
	pub async fn find_same_day_confirmed(
		p_id: i32,
		am_id: i32,
		day_start: NaiveDateTime,
		day_end: NaiveDateTime,
		conn: &DbConn,
	) -> Result<Option<Self>, Error> {
		let reservation = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				reservation
					.filter(profile_id.eq(p_id))
					.filter(amenity_id.eq(am_id))
					.filter(state.eq(ReservationState::Confirmed))
					.filter(start_time.ge(day_start))
					.filter(start_time.le(day_end))
					.select(Self::as_select())
					.first(conn)
					.optional()
			})
			.await??;

		Ok(reservation)
	}

	/// Count the confirmed reservations for the given amenity overlapping
	/// the given window
	#[instrument(skip(conn))]
	pub async fn count_overlapping_confirmed(
		am_id: i32,
		window_start: NaiveDateTime,
		window_end: NaiveDateTime,
		conn: &DbConn,
	) -> Result<i64, Error> {
		let occupied = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				reservation
					.filter(amenity_id.eq(am_id))
					.filter(state.eq(ReservationState::Confirmed))
					.filter(start_time.lt(window_end))
					.filter(end_time.gt(window_start))
					.count()
					.get_result::<i64>(conn)
			})
			.await??;

		Ok(occupied)
	}

	/// Get all non-hidden reservations of a profile, oldest start first,
	/// along with their amenities
	#[instrument(skip(conn))]
	pub async fn for_profile(
		p_id: i32,
		conn: &DbConn,
	) -> Result<Vec<(Self, Amenity)>, Error> {
		let reservations = conn
			.interact(move |conn| {
				reservation::table
					.inner_join(amenity::table)
					.filter(reservation::profile_id.eq(p_id))
					.filter(reservation::hidden_from_user.eq(false))
					.order(reservation::start_time.asc())
					.select((Self::as_select(), Amenity::as_select()))
					.get_results(conn)
			})
			.await??;

		Ok(reservations)
	}

	/// Get the confirmed reservations of an amenity, oldest start first,
	/// optionally restricted to a start-time window, along with the public
	/// display fields of the owning profiles
	#[instrument(skip(conn))]
	pub async fn for_amenity(
		am_id: i32,
		window: Option<(NaiveDateTime, NaiveDateTime)>,
		conn: &DbConn,
	) -> Result<Vec<(Self, SimpleProfile)>, Error> {
		let reservations = conn
			.interact(move |conn| {
				let mut query = reservation::table
					.inner_join(profile::table)
					.filter(reservation::amenity_id.eq(am_id))
					.filter(
						reservation::state.eq(ReservationState::Confirmed),
					)
					.select((Self::as_select(), SimpleProfile::as_select()))
					.into_boxed();

				if let Some((from, until)) = window {
					query = query
						.filter(reservation::start_time.ge(from))
						.filter(reservation::start_time.le(until));
				}

				query.order(reservation::start_time.asc()).get_results(conn)
			})
			.await??;

		Ok(reservations)
	}

	/// Set the lifecycle state of a reservation
	#[instrument(skip(conn))]
	pub async fn set_state(
		r_id: i32,
		new_state: ReservationState,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let now = chrono::Utc::now().naive_utc();

		let reservation = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				diesel::update(reservation.find(r_id))
					.set((state.eq(new_state), updated_at.eq(now)))
					.returning(Self::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("set reservation {} state to {:?}", r_id, new_state);

		Ok(reservation)
	}

	/// Set the user-visibility flag of a reservation
	#[instrument(skip(conn))]
	pub async fn set_hidden(
		r_id: i32,
		hidden: bool,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let now = chrono::Utc::now().naive_utc();

		let reservation = conn
			.interact(move |conn| {
				use self::reservation::dsl::*;

				diesel::update(reservation.find(r_id))
					.set((hidden_from_user.eq(hidden), updated_at.eq(now)))
					.returning(Self::as_returning())
					.get_result(conn)
			})
			.await??;

		Ok(reservation)
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = reservation)]
#[diesel(check_for_backend(Pg))]
pub struct NewReservation {
	pub profile_id: i32,
	pub amenity_id: i32,
	pub start_time: NaiveDateTime,
	pub end_time:   NaiveDateTime,
	pub state:      ReservationState,
}

impl NewReservation {
	/// Insert this [`NewReservation`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Reservation, Error> {
		let reservation = conn
			.interact(|conn| {
				use self::reservation::dsl::*;

				diesel::insert_into(reservation)
					.values(self)
					.returning(Reservation::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created reservation {reservation:?}");

		Ok(reservation)
	}
}
