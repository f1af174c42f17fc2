use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::engine::ProposedReservation;
use crate::error::Error;
use crate::models::{Amenity, Reservation, ReservationState, SimpleProfile};
use crate::schemas::amenity::AmenityResponse;
use crate::schemas::profile::SimpleProfileResponse;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
	pub amenity_id: Option<i32>,
	pub start_time: Option<String>,
	pub end_time:   Option<String>,
}

impl CreateReservationRequest {
	/// Check that all fields are present and parse the timestamps
	///
	/// Presence is checked before format so the caller learns about missing
	/// fields first
	pub fn into_proposal(self) -> Result<ProposedReservation, Error> {
		let Some(amenity_id) = self.amenity_id else {
			return Err(Error::MissingRequestData(
				"amenityId is required".to_string(),
			));
		};
		let Some(start_time) = self.start_time else {
			return Err(Error::MissingRequestData(
				"startTime is required".to_string(),
			));
		};
		let Some(end_time) = self.end_time else {
			return Err(Error::MissingRequestData(
				"endTime is required".to_string(),
			));
		};

		let start_time = parse_timestamp(&start_time, "startTime")?;
		let end_time = parse_timestamp(&end_time, "endTime")?;

		Ok(ProposedReservation { amenity_id, start_time, end_time })
	}
}

fn parse_timestamp(value: &str, field: &str) -> Result<NaiveDateTime, Error> {
	value.parse().map_err(|_| {
		Error::ValidationError(format!(
			"{field} is not a valid timestamp: '{value}'"
		))
	})
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmenityReservationFilter {
	pub start_date: Option<NaiveDate>,
	pub end_date:   Option<NaiveDate>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
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

impl From<Reservation> for ReservationResponse {
	fn from(reservation: Reservation) -> Self {
		Self {
			id:               reservation.id,
			profile_id:       reservation.profile_id,
			amenity_id:       reservation.amenity_id,
			start_time:       reservation.start_time,
			end_time:         reservation.end_time,
			state:            reservation.state,
			hidden_from_user: reservation.hidden_from_user,
			created_at:       reservation.created_at,
			updated_at:       reservation.updated_at,
		}
	}
}

/// A reservation in the owner's own listing, along with its amenity
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserReservationResponse {
	#[serde(flatten)]
	pub reservation: ReservationResponse,
	pub amenity:     AmenityResponse,
}

impl From<(Reservation, Amenity)> for UserReservationResponse {
	fn from((reservation, amenity): (Reservation, Amenity)) -> Self {
		Self { reservation: reservation.into(), amenity: amenity.into() }
	}
}

/// A reservation in an amenity's listing, along with the public display
/// fields of its owner
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmenityReservationResponse {
	#[serde(flatten)]
	pub reservation: ReservationResponse,
	pub profile:     SimpleProfileResponse,
}

impl From<(Reservation, SimpleProfile)> for AmenityReservationResponse {
	fn from((reservation, profile): (Reservation, SimpleProfile)) -> Self {
		Self { reservation: reservation.into(), profile: profile.into() }
	}
}
