use chrono::NaiveDateTime;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::DbConn;
use crate::error::Error;
use crate::schema::apartment;

/// A single apartment within the complex
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = apartment)]
#[diesel(check_for_backend(Pg))]
pub struct Apartment {
	pub id:               i32,
	pub number:           String,
	pub floor:            i32,
	pub owner_profile_id: Option<i32>,
	pub created_at:       NaiveDateTime,
}

impl Apartment {
	/// Get an [`Apartment`] given its id
	#[instrument(skip(conn))]
	pub async fn get(a_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let apartment = conn
			.interact(move |conn| {
				use self::apartment::dsl::*;

				apartment.find(a_id).select(Self::as_select()).get_result(conn)
			})
			.await??;

		Ok(apartment)
	}

	/// Get all [`Apartment`]s ordered by floor and number
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let apartments = conn
			.interact(|conn| {
				use self::apartment::dsl::*;

				apartment
					.order((floor.asc(), number.asc()))
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(apartments)
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = apartment)]
#[diesel(check_for_backend(Pg))]
pub struct NewApartment {
	pub number:           String,
	pub floor:            i32,
	pub owner_profile_id: Option<i32>,
}

impl NewApartment {
	/// Insert this [`NewApartment`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Apartment, Error> {
		let apartment = conn
			.interact(|conn| {
				use self::apartment::dsl::*;

				diesel::insert_into(apartment)
					.values(self)
					.returning(Apartment::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created apartment {}", apartment.id);

		Ok(apartment)
	}
}
