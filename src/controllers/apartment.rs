//! Controllers for [`Apartment`]s

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::DbPool;
use crate::error::Error;
use crate::models::{Apartment, Profile};
use crate::schemas::apartment::{ApartmentResponse, CreateApartmentRequest};
use crate::schemas::profile::ProfileResponse;
use crate::session::{AdminSession, Session};

#[instrument(skip(pool))]
pub async fn get_all_apartments(
	State(pool): State<DbPool>,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let apartments = Apartment::get_all(&conn).await?;
	let response: Vec<ApartmentResponse> =
		apartments.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn get_apartment(
	State(pool): State<DbPool>,
	session: Session,
	Path(a_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let apartment = Apartment::get(a_id, &conn).await?;
	let response: ApartmentResponse = apartment.into();

	Ok((StatusCode::OK, Json(response)))
}

/// Get all profiles registered to an apartment
#[instrument(skip(pool))]
pub async fn get_apartment_occupants(
	State(pool): State<DbPool>,
	session: Session,
	Path(a_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let occupants = Profile::for_apartment(a_id, &conn).await?;
	let response: Vec<ProfileResponse> =
		occupants.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn create_apartment(
	State(pool): State<DbPool>,
	session: AdminSession,
	Json(request): Json<CreateApartmentRequest>,
) -> Result<impl IntoResponse, Error> {
	let new_apartment = request.to_insertable()?;

	let conn = pool.get().await?;

	let apartment = new_apartment.insert(&conn).await?;
	let response: ApartmentResponse = apartment.into();

	Ok((StatusCode::CREATED, Json(response)))
}
