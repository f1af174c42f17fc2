//! Controllers for [`Amenity`]s

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::DbPool;
use crate::error::Error;
use crate::models::Amenity;
use crate::schemas::amenity::{
	AmenityResponse,
	CreateAmenityRequest,
	UpdateAmenityRequest,
};
use crate::schemas::pagination::PaginationOptions;
use crate::session::{AdminSession, Session};

#[instrument(skip(pool))]
pub async fn get_all_amenities(
	State(pool): State<DbPool>,
	session: Session,
	Query(p_opts): Query<PaginationOptions>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let (total, amenities) =
		Amenity::get_all(p_opts.limit(), p_opts.offset(), &conn).await?;
	let amenities: Vec<AmenityResponse> =
		amenities.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(p_opts.paginate(total, amenities))))
}

#[instrument(skip(pool))]
pub async fn get_amenity(
	State(pool): State<DbPool>,
	session: Session,
	Path(am_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let amenity = Amenity::get(am_id, &conn).await?;
	let response: AmenityResponse = amenity.into();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn create_amenity(
	State(pool): State<DbPool>,
	session: AdminSession,
	Json(request): Json<CreateAmenityRequest>,
) -> Result<impl IntoResponse, Error> {
	let new_amenity = request.to_insertable(session.data.profile_id)?;

	let conn = pool.get().await?;

	let amenity = new_amenity.insert(&conn).await?;
	let response: AmenityResponse = amenity.into();

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(pool))]
pub async fn update_amenity(
	State(pool): State<DbPool>,
	session: AdminSession,
	Path(am_id): Path<i32>,
	Json(request): Json<UpdateAmenityRequest>,
) -> Result<impl IntoResponse, Error> {
	let amenity_update = request.to_changeset()?;

	let conn = pool.get().await?;

	let updated_amenity = amenity_update.apply_to(am_id, &conn).await?;
	let response: AmenityResponse = updated_amenity.into();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn delete_amenity(
	State(pool): State<DbPool>,
	session: AdminSession,
	Path(am_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	Amenity::delete_by_id(am_id, &conn).await?;

	Ok(StatusCode::NO_CONTENT)
}
