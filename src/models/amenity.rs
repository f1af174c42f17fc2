use chrono::NaiveDateTime;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::DbConn;
use crate::error::Error;
use crate::schema::amenity;

/// A shared facility bookable in timed slots
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = amenity)]
#[diesel(check_for_backend(Pg))]
pub struct Amenity {
	pub id:                   i32,
	pub name:                 String,
	pub description:          Option<String>,
	/// Max number of simultaneous confirmed reservations at any instant
	pub capacity:             i32,
	/// Longest permitted single reservation
	pub max_duration_minutes: i32,
	pub created_at:           NaiveDateTime,
	pub created_by:           Option<i32>,
}

impl Amenity {
	/// Get an [`Amenity`] given its id
	#[instrument(skip(conn))]
	pub async fn get(am_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let amenity = conn
			.interact(move |conn| {
				use self::amenity::dsl::*;

				amenity.find(am_id).select(Self::as_select()).get_result(conn)
			})
			.await??;

		Ok(amenity)
	}

	/// Get an [`Amenity`] given its id, if it exists
	#[instrument(skip(conn))]
	pub async fn get_opt(
		am_id: i32,
		conn: &DbConn,
	) -> Result<Option<Self>, Error> {
		let amenity = conn
			.interact(move |conn| {
				use self::amenity::dsl::*;

				amenity
					.find(am_id)
					.select(Self::as_select())
					.get_result(conn)
					.optional()
			})
			.await??;

		Ok(amenity)
	}

	/// Get a page of [`Amenity`]s along with the total number of rows
	#[instrument(skip(conn))]
	pub async fn get_all(
		limit: i64,
		offset: i64,
		conn: &DbConn,
	) -> Result<(i64, Vec<Self>), Error> {
		let total = conn
			.interact(|conn| {
				use self::amenity::dsl::*;

				amenity.count().get_result::<i64>(conn)
			})
			.await??;

		let amenities = conn
			.interact(move |conn| {
				use self::amenity::dsl::*;

				amenity
					.order(name.asc())
					.limit(limit)
					.offset(offset)
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok((total, amenities))
	}

	/// Delete an [`Amenity`] given its id
	///
	/// Fails with a validation error while reservations still reference the
	/// amenity (foreign key restriction)
	#[instrument(skip(conn))]
	pub async fn delete_by_id(am_id: i32, conn: &DbConn) -> Result<(), Error> {
		conn.interact(move |conn| {
			use self::amenity::dsl::*;

			diesel::delete(amenity.find(am_id)).execute(conn)
		})
		.await??;

		info!("deleted amenity with id {am_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = amenity)]
#[diesel(check_for_backend(Pg))]
pub struct NewAmenity {
	pub name:                 String,
	pub description:          Option<String>,
	pub capacity:             i32,
	pub max_duration_minutes: i32,
	pub created_by:           Option<i32>,
}

impl NewAmenity {
	/// Insert this [`NewAmenity`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Amenity, Error> {
		let amenity = conn
			.interact(|conn| {
				use self::amenity::dsl::*;

				diesel::insert_into(amenity)
					.values(self)
					.returning(Amenity::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created amenity {} ({})", amenity.id, amenity.name);

		Ok(amenity)
	}
}

/// A partial update to an [`Amenity`]
#[derive(AsChangeset, Clone, Debug, Deserialize, Serialize)]
#[diesel(table_name = amenity)]
pub struct AmenityUpdate {
	pub name:                 Option<String>,
	pub description:          Option<String>,
	pub capacity:             Option<i32>,
	pub max_duration_minutes: Option<i32>,
}

impl AmenityUpdate {
	/// Apply this update to the amenity with the given id
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		am_id: i32,
		conn: &DbConn,
	) -> Result<Amenity, Error> {
		let amenity = conn
			.interact(move |conn| {
				use self::amenity::dsl::*;

				diesel::update(amenity.find(am_id))
					.set(self)
					.returning(Amenity::as_returning())
					.get_result(conn)
			})
			.await??;

		Ok(amenity)
	}
}
