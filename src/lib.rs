//! # Woonblok backend library

#[macro_use]
extern crate tracing;

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use deadpool_diesel::postgres::{Object, Pool};

mod config;

pub mod controllers;
pub mod engine;
pub mod error;
pub mod models;
pub mod routes;
pub mod schema;
pub mod schemas;
pub mod session;
pub mod store;

pub use config::Config;
pub use error::Error;

use engine::ReservationEngine;
use store::ReservationStore;

pub type DbPool = Pool;
pub type DbConn = Object;

/// Common state of the app
#[derive(Clone)]
pub struct AppState {
	pub config:         Config,
	pub database_pool:  DbPool,
	pub engine:         ReservationEngine,
	pub cookie_jar_key: Key,
}

impl AppState {
	/// Assemble the app state around an injected [`ReservationStore`]
	#[must_use]
	pub fn new(
		config: Config,
		database_pool: DbPool,
		store: Arc<dyn ReservationStore>,
		cookie_jar_key: Key,
	) -> Self {
		Self {
			config,
			database_pool,
			engine: ReservationEngine::new(store),
			cookie_jar_key,
		}
	}
}

impl FromRef<AppState> for Config {
	fn from_ref(input: &AppState) -> Self { input.config.clone() }
}

impl FromRef<AppState> for DbPool {
	fn from_ref(input: &AppState) -> Self { input.database_pool.clone() }
}

impl FromRef<AppState> for ReservationEngine {
	fn from_ref(input: &AppState) -> Self { input.engine.clone() }
}

impl FromRef<AppState> for Key {
	fn from_ref(input: &AppState) -> Self { input.cookie_jar_key.clone() }
}
