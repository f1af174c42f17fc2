//! Typed caller identity resolved from the session cookie
//!
//! The authentication service in front of this backend issues a private
//! (encrypted) cookie holding the serialized [`SessionData`]; this module
//! only decodes it, it never parses tokens itself.

use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::PrivateCookieJar;
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::error::{Error, SessionError};
use crate::models::ProfileRole;

/// The identity of any authenticated caller
///
/// ```rs
/// pub async fn foo_route(session: Session) -> impl IntoResponse {
///     println!("{:?}", session.data.profile_id);
///
///     ()
/// }
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Session {
	pub data: SessionData,
}

/// The identity of an admin caller
#[derive(Clone, Copy, Debug)]
pub struct AdminSession {
	pub data: SessionData,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct SessionData {
	pub profile_id: i32,
	pub role:       ProfileRole,
}

impl SessionData {
	#[must_use]
	pub fn is_admin(&self) -> bool { self.role == ProfileRole::Admin }
}

impl FromRequestParts<AppState> for Session {
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut Parts,
		state: &AppState,
	) -> Result<Self, Self::Rejection> {
		let jar = parts
			.extract_with_state::<PrivateCookieJar, AppState>(state)
			.await
			.map_err(|_| Error::InternalServerError)?;

		let Some(session_cookie) = jar.get(&state.config.session_cookie_name)
		else {
			info!("got request without valid session cookie");

			return Err(SessionError::MissingSessionCookie.into());
		};

		let data = serde_json::from_str::<SessionData>(session_cookie.value())
			.map_err(|_| SessionError::InvalidSessionCookie)?;

		Ok(Self { data })
	}
}

impl FromRequestParts<AppState> for AdminSession {
	type Rejection = Error;

	async fn from_request_parts(
		parts: &mut Parts,
		state: &AppState,
	) -> Result<Self, Self::Rejection> {
		let session =
			parts.extract_with_state::<Session, AppState>(state).await?;

		if !session.data.is_admin() {
			return Err(Error::Forbidden);
		}

		Ok(Self { data: session.data })
	}
}
