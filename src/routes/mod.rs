//! Router assembly

use std::time::Duration;

use axum::Router;
use axum::routing::{get, patch, post};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::controllers::amenity::{
	create_amenity,
	delete_amenity,
	get_all_amenities,
	get_amenity,
	update_amenity,
};
use crate::controllers::apartment::{
	create_apartment,
	get_all_apartments,
	get_apartment,
	get_apartment_occupants,
};
use crate::controllers::healthcheck;
use crate::controllers::profile::{
	create_profile,
	get_all_profiles,
	get_current_profile,
};
use crate::controllers::reservation::{
	cancel_reservation,
	create_reservation,
	get_amenity_reservations,
	get_own_reservations,
	hide_reservation,
};

/// Build the app router around the given state
pub fn get_app_router(state: AppState) -> Router {
	Router::new()
		.route("/healthcheck", get(healthcheck))
		.nest(
			"/reservations",
			Router::new()
				.route(
					"/",
					post(create_reservation).get(get_own_reservations),
				)
				.route("/{id}/cancel", patch(cancel_reservation))
				.route("/{id}/hide", patch(hide_reservation))
				.route("/amenity/{id}", get(get_amenity_reservations)),
		)
		.nest(
			"/amenities",
			Router::new()
				.route("/", get(get_all_amenities).post(create_amenity))
				.route(
					"/{id}",
					get(get_amenity)
						.patch(update_amenity)
						.delete(delete_amenity),
				),
		)
		.nest(
			"/profile",
			Router::new()
				.route("/", get(get_all_profiles).post(create_profile))
				.route("/me", get(get_current_profile)),
		)
		.nest(
			"/apartments",
			Router::new()
				.route("/", get(get_all_apartments).post(create_apartment))
				.route("/{id}", get(get_apartment))
				.route("/{id}/occupants", get(get_apartment_occupants)),
		)
		.layer(TraceLayer::new_for_http())
		.layer(TimeoutLayer::new(Duration::from_secs(5)))
		.layer(CorsLayer::permissive())
		.with_state(state)
}
