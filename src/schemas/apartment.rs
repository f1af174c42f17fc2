use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;
use validator_derive::Validate;

use crate::error::Error;
use crate::models::{Apartment, NewApartment};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApartmentResponse {
	pub id:               i32,
	pub number:           String,
	pub floor:            i32,
	pub owner_profile_id: Option<i32>,
	pub created_at:       NaiveDateTime,
}

impl From<Apartment> for ApartmentResponse {
	fn from(apartment: Apartment) -> Self {
		Self {
			id:               apartment.id,
			number:           apartment.number,
			floor:            apartment.floor,
			owner_profile_id: apartment.owner_profile_id,
			created_at:       apartment.created_at,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateApartmentRequest {
	#[validate(length(min = 1, max = 16))]
	pub number:           String,
	pub floor:            i32,
	pub owner_profile_id: Option<i32>,
}

impl CreateApartmentRequest {
	pub fn to_insertable(self) -> Result<NewApartment, Error> {
		self.validate()?;

		Ok(NewApartment {
			number:           self.number,
			floor:            self.floor,
			owner_profile_id: self.owner_profile_id,
		})
	}
}
