//! Controllers for [`Reservation`](crate::models::Reservation)s

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::engine::ReservationEngine;
use crate::error::Error;
use crate::schemas::reservation::{
	AmenityReservationFilter,
	AmenityReservationResponse,
	CreateReservationRequest,
	ReservationResponse,
	UserReservationResponse,
};
use crate::session::Session;

#[instrument(skip(engine))]
pub async fn create_reservation(
	State(engine): State<ReservationEngine>,
	session: Session,
	Json(request): Json<CreateReservationRequest>,
) -> Result<impl IntoResponse, Error> {
	let proposal = request.into_proposal()?;

	let reservation =
		engine.propose(session.data.profile_id, proposal).await?;
	let response = ReservationResponse::from(reservation);

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(engine))]
pub async fn get_own_reservations(
	State(engine): State<ReservationEngine>,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	let reservations = engine.for_profile(session.data.profile_id).await?;
	let response: Vec<UserReservationResponse> =
		reservations.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(engine))]
pub async fn cancel_reservation(
	State(engine): State<ReservationEngine>,
	session: Session,
	Path(r_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let reservation = engine.cancel(session.data.profile_id, r_id).await?;
	let response = ReservationResponse::from(reservation);

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(engine))]
pub async fn hide_reservation(
	State(engine): State<ReservationEngine>,
	session: Session,
	Path(r_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let reservation = engine.hide(session.data.profile_id, r_id).await?;
	let response = ReservationResponse::from(reservation);

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(engine))]
pub async fn get_amenity_reservations(
	State(engine): State<ReservationEngine>,
	session: Session,
	Path(am_id): Path<i32>,
	Query(filter): Query<AmenityReservationFilter>,
) -> Result<impl IntoResponse, Error> {
	let reservations = engine
		.for_amenity(am_id, filter.start_date, filter.end_date)
		.await?;
	let response: Vec<AmenityReservationResponse> =
		reservations.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}
