use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;
use validator_derive::Validate;

use crate::error::Error;
use crate::models::{NewProfile, Profile, ProfileRole, SimpleProfile};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
	pub id:           i32,
	pub username:     String,
	pub email:        Option<String>,
	pub first_name:   Option<String>,
	pub last_name:    Option<String>,
	pub role:         ProfileRole,
	pub apartment_id: Option<i32>,
	pub created_at:   NaiveDateTime,
}

impl From<Profile> for ProfileResponse {
	fn from(profile: Profile) -> Self {
		Self {
			id:           profile.id,
			username:     profile.username,
			email:        profile.email,
			first_name:   profile.first_name,
			last_name:    profile.last_name,
			role:         profile.role,
			apartment_id: profile.apartment_id,
			created_at:   profile.created_at,
		}
	}
}

/// The public display fields of a profile
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleProfileResponse {
	pub id:       i32,
	pub username: String,
}

impl From<SimpleProfile> for SimpleProfileResponse {
	fn from(profile: SimpleProfile) -> Self {
		Self { id: profile.id, username: profile.username }
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileRequest {
	#[validate(length(min = 2, max = 32))]
	pub username:     String,
	#[validate(email)]
	pub email:        Option<String>,
	pub first_name:   Option<String>,
	pub last_name:    Option<String>,
	pub role:         ProfileRole,
	pub apartment_id: Option<i32>,
}

impl CreateProfileRequest {
	pub fn to_insertable(self) -> Result<NewProfile, Error> {
		self.validate()?;

		Ok(NewProfile {
			username:     self.username,
			email:        self.email,
			first_name:   self.first_name,
			last_name:    self.last_name,
			role:         self.role,
			apartment_id: self.apartment_id,
		})
	}
}
