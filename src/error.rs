//! Application-wide error types and [`From`] impls

use std::collections::HashMap;
use std::sync::LazyLock;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use diesel::result::DatabaseErrorKind;
use thiserror::Error;

/// Top level application error, can be converted into a [`Response`]
#[derive(Debug, Error)]
pub enum Error {
	/// Duplicate resource created
	#[error("{0}")]
	Duplicate(String),
	/// Request/operation forbidden
	#[error("forbidden")]
	Forbidden,
	/// An error that should never happen
	#[error("{0}")]
	Infallible(String),
	/// Opaque internal server error
	#[error("internal server error")]
	InternalServerError,
	/// Some data in the request was missing
	#[error("{0}")]
	MissingRequestData(String),
	/// Resource not found
	#[error("not found - {0}")]
	NotFound(String),
	/// Any error related to resolving the caller identity
	#[error(transparent)]
	SessionError(#[from] SessionError),
	/// Any error related to creating a reservation
	#[error(transparent)]
	CreateReservationError(#[from] CreateReservationError),
	/// Resource could not be validated
	#[error("{0}")]
	ValidationError(String),
}

impl Error {
	/// Return a unique identifying code for this error
	///
	/// When modifying this function the error code should only ever increase,
	/// an error code should never be reused once its assigned to avoid
	/// unexpectedly breaking the frontend
	fn code(&self) -> i32 {
		match self {
			Self::Duplicate(_) => 1,
			Self::Forbidden => 2,
			Self::Infallible(_) => 3,
			Self::InternalServerError => 4,
			Self::MissingRequestData(_) => 5,
			Self::NotFound(_) => 6,
			Self::SessionError(e) => {
				match e {
					SessionError::MissingSessionCookie => 7,
					SessionError::InvalidSessionCookie => 8,
				}
			},
			Self::CreateReservationError(e) => {
				match e {
					CreateReservationError::TooLong { .. } => 9,
					CreateReservationError::InvalidTimeRange => 10,
					CreateReservationError::OverlapsOwnReservation => 11,
					CreateReservationError::AlreadyReservedThatDay => 12,
					CreateReservationError::Full { .. } => 13,
				}
			},
			Self::ValidationError(_) => 14,
		}
	}

	/// Return additional information about the error
	fn info(&self) -> Option<String> {
		match self {
			Self::Duplicate(m)
			| Self::Infallible(m)
			| Self::MissingRequestData(m)
			| Self::NotFound(m)
			| Self::ValidationError(m) => Some(m.to_owned()),
			Self::CreateReservationError(e) => {
				match e {
					CreateReservationError::TooLong {
						amenity,
						max_minutes,
					} => {
						Some(
							serde_json::json!({
								"amenity": amenity,
								"maxMinutes": max_minutes,
							})
							.to_string(),
						)
					},
					CreateReservationError::Full { capacity } => {
						Some(
							serde_json::json!({"capacity": capacity})
								.to_string(),
						)
					},
					_ => None,
				}
			},
			_ => None,
		}
	}
}

/// Convert an error into a [`Response`]
impl IntoResponse for Error {
	fn into_response(self) -> Response {
		error!("{self:?}");

		let message = self.to_string();

		let data = serde_json::json!({
			"message": message,
			"code": self.code(),
			"info": self.info(),
		});

		let status = match self {
			Self::Duplicate(_) => StatusCode::CONFLICT,
			Self::InternalServerError | Self::Infallible(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			},
			Self::Forbidden => StatusCode::FORBIDDEN,
			Self::SessionError(_) => StatusCode::UNAUTHORIZED,
			Self::CreateReservationError(_)
			| Self::MissingRequestData(_)
			| Self::ValidationError(_) => StatusCode::BAD_REQUEST,
			Self::NotFound(_) => StatusCode::NOT_FOUND,
		};

		(status, axum::Json(data)).into_response()
	}
}

/// Any error related to resolving the caller identity from a request
#[derive(Debug, Error)]
pub enum SessionError {
	#[error("missing or unreadable session cookie")]
	MissingSessionCookie,
	#[error("malformed session cookie payload")]
	InvalidSessionCookie,
}

/// A rejection of a proposed reservation
#[derive(Debug, Error)]
pub enum CreateReservationError {
	/// The requested window is longer than the amenity allows
	#[error(
		"a reservation for '{amenity}' may last at most {max_minutes} minutes"
	)]
	TooLong { amenity: String, max_minutes: i32 },
	/// The requested window ends before it starts
	#[error("the start time must fall strictly before the end time")]
	InvalidTimeRange,
	/// The caller already holds a confirmed reservation in this window
	#[error("an existing reservation overlaps the requested window")]
	OverlapsOwnReservation,
	/// The caller already visits this amenity on the requested day
	#[error("this amenity is already reserved by this account on the same day")]
	AlreadyReservedThatDay,
	/// Every slot of the amenity is taken somewhere in the window
	#[error("the amenity is fully booked during the requested window")]
	Full { capacity: i32 },
}

/// A list of possible internal errors
///
/// API end users should never see these details
#[derive(Debug, Error)]
pub enum InternalServerError {
	/// Error executing some database operation
	#[error("database error -- {0:?}")]
	DatabaseError(diesel::result::Error),
	/// Error interacting with a database connection
	#[error("database interaction error -- {0:?}")]
	DatabaseInteractionError(deadpool_diesel::InteractError),
	/// Error acquiring database pool connection
	#[error("database pool error -- {0:?}")]
	PoolError(deadpool_diesel::PoolError),
	/// Error related to `serde_json`
	#[error("serde_json error -- {0:?}")]
	SerdeJsonError(serde_json::Error),
}

// Map internal server errors to application errors
impl From<InternalServerError> for Error {
	fn from(value: InternalServerError) -> Self {
		error!("internal server error -- {value}");

		Self::InternalServerError
	}
}

/// Map validation errors to application errors
impl From<validator::ValidationErrors> for Error {
	fn from(err: validator::ValidationErrors) -> Self {
		let errs = err.field_errors();
		let repr = errs
			.values()
			.map(|v| {
				v.iter()
					.map(ToString::to_string)
					.collect::<Vec<String>>()
					.join("\n")
			})
			.collect::<Vec<String>>()
			.join("\n");

		Self::ValidationError(repr)
	}
}

/// Map database interaction errors to application errors
impl From<deadpool_diesel::InteractError> for Error {
	fn from(value: deadpool_diesel::InteractError) -> Self {
		InternalServerError::DatabaseInteractionError(value).into()
	}
}

/// Map of constraint names to column names.
static CONSTRAINT_TO_COLUMN: LazyLock<HashMap<&str, &str>> =
	LazyLock::new(|| {
		HashMap::from([
			("amenity_name_lower_key", "name"),
			("apartment_number_key", "number"),
			("profile_username_key", "username"),
		])
	});

/// Map database result errors to application errors.
impl From<diesel::result::Error> for Error {
	fn from(err: diesel::result::Error) -> Self {
		match &err {
			// No rows returned by query that expected at least one
			diesel::result::Error::NotFound => {
				Self::NotFound("no context provided".to_string())
			},
			// Unique constraint violation
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::UniqueViolation,
				info,
			) => {
				match info
					.constraint_name()
					.and_then(|name| CONSTRAINT_TO_COLUMN.get(name))
				{
					Some(field) => {
						Self::Duplicate(format!("{field} is already in use"))
					},
					None => InternalServerError::DatabaseError(err).into(),
				}
			},
			// Foreign key constraint violation
			diesel::result::Error::DatabaseError(
				DatabaseErrorKind::ForeignKeyViolation,
				info,
			) => Error::ValidationError(info.message().to_string()),
			_ => InternalServerError::DatabaseError(err).into(),
		}
	}
}

impl From<deadpool_diesel::PoolError> for Error {
	fn from(value: deadpool_diesel::PoolError) -> Self {
		InternalServerError::PoolError(value).into()
	}
}

impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		InternalServerError::SerdeJsonError(err).into()
	}
}
