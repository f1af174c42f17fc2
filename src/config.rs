use axum_extra::extract::cookie::Key;
use deadpool_diesel::postgres::{Manager, Pool};

#[derive(Clone, Debug)]
pub struct Config {
	pub database_url: String,

	pub session_cookie_name: String,
}

impl Config {
	fn get_env_var(var: &str) -> String {
		std::env::var(var).unwrap_or_else(|_| panic!("{var} must be set"))
	}

	/// Create a new [`Config`] from environment variables
	///
	/// # Panics
	/// Panics if an environment variable is missing
	#[must_use]
	pub fn from_env() -> Self {
		let database_url = Self::get_env_var("DATABASE_URL");

		let session_cookie_name = std::env::var("SESSION_COOKIE_NAME")
			.unwrap_or_else(|_| "woonblok_session".to_string());

		Self { database_url, session_cookie_name }
	}

	/// Create a database pool for the given config
	///
	/// # Panics
	/// Panics if creating the pool fails
	#[must_use]
	pub fn create_database_pool(&self) -> Pool {
		let manager = Manager::new(
			self.database_url.to_string(),
			deadpool_diesel::Runtime::Tokio1,
		);

		Pool::builder(manager).build().unwrap()
	}

	/// Derive the cookie jar key from the environment
	///
	/// # Panics
	/// Panics if `SESSION_COOKIE_SECRET` is missing or shorter than 32 bytes
	#[must_use]
	pub fn cookie_jar_key() -> Key {
		Key::derive_from(Self::get_env_var("SESSION_COOKIE_SECRET").as_bytes())
	}
}
