use chrono::NaiveDateTime;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

use crate::DbConn;
use crate::error::Error;
use crate::schema::profile;

/// The role a resident holds within the complex
#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::schema::sql_types::ProfileRole"]
#[serde(rename_all = "camelCase")]
pub enum ProfileRole {
	#[default]
	Tenant,
	Owner,
	Admin,
}

/// A single resident account
#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = profile)]
#[diesel(check_for_backend(Pg))]
pub struct Profile {
	pub id:           i32,
	pub username:     String,
	pub email:        Option<String>,
	pub first_name:   Option<String>,
	pub last_name:    Option<String>,
	pub role:         ProfileRole,
	pub apartment_id: Option<i32>,
	pub created_at:   NaiveDateTime,
}

/// The public display fields of a [`Profile`]
#[derive(Clone, Debug, Deserialize, Queryable, Selectable, Serialize)]
#[diesel(table_name = profile)]
#[diesel(check_for_backend(Pg))]
pub struct SimpleProfile {
	pub id:       i32,
	pub username: String,
}

impl Profile {
	/// Get a [`Profile`] given its id
	#[instrument(skip(conn))]
	pub async fn get(p_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let profile = conn
			.interact(move |conn| {
				use self::profile::dsl::*;

				profile.find(p_id).select(Self::as_select()).get_result(conn)
			})
			.await??;

		Ok(profile)
	}

	/// Get a page of [`Profile`]s along with the total number of rows
	#[instrument(skip(conn))]
	pub async fn get_all(
		limit: i64,
		offset: i64,
		conn: &DbConn,
	) -> Result<(i64, Vec<Self>), Error> {
		let total = conn
			.interact(|conn| {
				use self::profile::dsl::*;

				profile.count().get_result::<i64>(conn)
			})
			.await??;

		let profiles = conn
			.interact(move |conn| {
				use self::profile::dsl::*;

				profile
					.order(username.asc())
					.limit(limit)
					.offset(offset)
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok((total, profiles))
	}

	/// Get all [`Profile`]s registered to a given apartment
	#[instrument(skip(conn))]
	pub async fn for_apartment(
		a_id: i32,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let occupants = conn
			.interact(move |conn| {
				use self::profile::dsl::*;

				profile
					.filter(apartment_id.eq(a_id))
					.order(username.asc())
					.select(Self::as_select())
					.get_results(conn)
			})
			.await??;

		Ok(occupants)
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = profile)]
#[diesel(check_for_backend(Pg))]
pub struct NewProfile {
	pub username:     String,
	pub email:        Option<String>,
	pub first_name:   Option<String>,
	pub last_name:    Option<String>,
	pub role:         ProfileRole,
	pub apartment_id: Option<i32>,
}

impl NewProfile {
	/// Insert this [`NewProfile`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Profile, Error> {
		let profile = conn
			.interact(|conn| {
				use self::profile::dsl::*;

				diesel::insert_into(profile)
					.values(self)
					.returning(Profile::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created profile {}", profile.id);

		Ok(profile)
	}
}
