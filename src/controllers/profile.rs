//! Controllers for [`Profile`]s

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::DbPool;
use crate::error::Error;
use crate::models::Profile;
use crate::schemas::pagination::PaginationOptions;
use crate::schemas::profile::{CreateProfileRequest, ProfileResponse};
use crate::session::{AdminSession, Session};

/// Get all [`Profile`]s
#[instrument(skip(pool))]
pub async fn get_all_profiles(
	State(pool): State<DbPool>,
	session: AdminSession,
	Query(p_opts): Query<PaginationOptions>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let (total, profiles) =
		Profile::get_all(p_opts.limit(), p_opts.offset(), &conn).await?;
	let profiles: Vec<ProfileResponse> =
		profiles.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(p_opts.paginate(total, profiles))))
}

/// Get the profile of the calling user
#[instrument(skip(pool))]
pub async fn get_current_profile(
	State(pool): State<DbPool>,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let profile = Profile::get(session.data.profile_id, &conn).await?;
	let response: ProfileResponse = profile.into();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub async fn create_profile(
	State(pool): State<DbPool>,
	session: AdminSession,
	Json(request): Json<CreateProfileRequest>,
) -> Result<impl IntoResponse, Error> {
	let new_profile = request.to_insertable()?;

	let conn = pool.get().await?;

	let profile = new_profile.insert(&conn).await?;
	let response: ProfileResponse = profile.into();

	Ok((StatusCode::CREATED, Json(response)))
}
