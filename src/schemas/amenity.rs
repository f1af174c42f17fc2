use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;
use validator_derive::Validate;

use crate::error::Error;
use crate::models::{Amenity, AmenityUpdate, NewAmenity};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmenityResponse {
	pub id:                   i32,
	pub name:                 String,
	pub description:          Option<String>,
	pub capacity:             i32,
	pub max_duration_minutes: i32,
	pub created_at:           NaiveDateTime,
}

impl From<Amenity> for AmenityResponse {
	fn from(amenity: Amenity) -> Self {
		Self {
			id:                   amenity.id,
			name:                 amenity.name,
			description:          amenity.description,
			capacity:             amenity.capacity,
			max_duration_minutes: amenity.max_duration_minutes,
			created_at:           amenity.created_at,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAmenityRequest {
	#[validate(length(min = 1, max = 100))]
	pub name:                 String,
	pub description:          Option<String>,
	#[validate(range(min = 1))]
	pub capacity:             i32,
	#[validate(range(min = 1))]
	pub max_duration_minutes: i32,
}

impl CreateAmenityRequest {
	pub fn to_insertable(self, created_by: i32) -> Result<NewAmenity, Error> {
		self.validate()?;

		Ok(NewAmenity {
			name:                 self.name,
			description:          self.description,
			capacity:             self.capacity,
			max_duration_minutes: self.max_duration_minutes,
			created_by:           Some(created_by),
		})
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAmenityRequest {
	#[validate(length(min = 1, max = 100))]
	pub name:                 Option<String>,
	pub description:          Option<String>,
	#[validate(range(min = 1))]
	pub capacity:             Option<i32>,
	#[validate(range(min = 1))]
	pub max_duration_minutes: Option<i32>,
}

impl UpdateAmenityRequest {
	pub fn to_changeset(self) -> Result<AmenityUpdate, Error> {
		self.validate()?;

		Ok(AmenityUpdate {
			name:                 self.name,
			description:          self.description,
			capacity:             self.capacity,
			max_duration_minutes: self.max_duration_minutes,
		})
	}
}
