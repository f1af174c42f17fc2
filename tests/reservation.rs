use axum::http::StatusCode;

mod common;

use common::TestEnv;
use woonblok::models::{ProfileRole, ReservationState};
use woonblok::schemas::reservation::{
	AmenityReservationResponse,
	ReservationResponse,
	UserReservationResponse,
};

fn booking(amenity_id: i32, start: &str, end: &str) -> serde_json::Value {
	serde_json::json!({
		"amenityId": amenity_id,
		"startTime": start,
		"endTime": end,
	})
}

#[tokio::test(flavor = "multi_thread")]
async fn create_reservation() {
	let mut env = TestEnv::new();

	let pool = env.store.add_amenity("Pool", 3, 120);
	let alice = env.store.add_profile("alice");
	env.login(alice.id, ProfileRole::Tenant);

	let response = env
		.app
		.post("/reservations")
		.json(&booking(pool.id, "2026-03-14T10:00:00", "2026-03-14T11:00:00"))
		.await;

	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<ReservationResponse>();

	assert!(body.id > 0);
	assert_eq!(body.profile_id, alice.id);
	assert_eq!(body.amenity_id, pool.id);
	assert_eq!(body.state, ReservationState::Confirmed);
	assert!(!body.hidden_from_user);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_reservation_requires_session() {
	let env = TestEnv::new();

	let pool = env.store.add_amenity("Pool", 3, 120);

	let response = env
		.app
		.post("/reservations")
		.json(&booking(pool.id, "2026-03-14T10:00:00", "2026-03-14T11:00:00"))
		.await;

	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_reservation_with_missing_fields() {
	let mut env = TestEnv::new();

	let pool = env.store.add_amenity("Pool", 3, 120);
	let alice = env.store.add_profile("alice");
	env.login(alice.id, ProfileRole::Tenant);

	let response =
		env.app.post("/reservations").json(&serde_json::json!({})).await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

	let response = env
		.app
		.post("/reservations")
		.json(&serde_json::json!({
			"amenityId": pool.id,
			"startTime": "2026-03-14T10:00:00",
		}))
		.await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

	let body = response.json::<serde_json::Value>();
	assert!(
		body["message"].as_str().unwrap().contains("endTime"),
		"unexpected message: {}",
		body["message"]
	);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_reservation_with_malformed_timestamp() {
	let mut env = TestEnv::new();

	let pool = env.store.add_amenity("Pool", 3, 120);
	let alice = env.store.add_profile("alice");
	env.login(alice.id, ProfileRole::Tenant);

	let response = env
		.app
		.post("/reservations")
		.json(&booking(pool.id, "not-a-timestamp", "2026-03-14T11:00:00"))
		.await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_reservation_for_unknown_amenity() {
	let mut env = TestEnv::new();

	let alice = env.store.add_profile("alice");
	env.login(alice.id, ProfileRole::Tenant);

	let response = env
		.app
		.post("/reservations")
		.json(&booking(99, "2026-03-14T10:00:00", "2026-03-14T11:00:00"))
		.await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_reservation_above_max_duration() {
	let mut env = TestEnv::new();

	let pool = env.store.add_amenity("Pool", 3, 120);
	let alice = env.store.add_profile("alice");
	env.login(alice.id, ProfileRole::Tenant);

	let response = env
		.app
		.post("/reservations")
		.json(&booking(pool.id, "2026-03-14T10:00:00", "2026-03-14T13:00:00"))
		.await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

	let body = response.json::<serde_json::Value>();
	let message = body["message"].as_str().unwrap();
	assert!(message.contains("Pool"), "unexpected message: {message}");
	assert!(message.contains("120"), "unexpected message: {message}");
}

#[tokio::test(flavor = "multi_thread")]
async fn create_reservation_with_inverted_window() {
	let mut env = TestEnv::new();

	let pool = env.store.add_amenity("Pool", 3, 120);
	let alice = env.store.add_profile("alice");
	env.login(alice.id, ProfileRole::Tenant);

	let response = env
		.app
		.post("/reservations")
		.json(&booking(pool.id, "2026-03-14T11:00:00", "2026-03-14T10:00:00"))
		.await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_reservation_beyond_capacity() {
	let mut env = TestEnv::new();

	let pool = env.store.add_amenity("Pool", 3, 120);

	for username in ["alice", "bob", "carol"] {
		let profile = env.store.add_profile(username);
		env.login(profile.id, ProfileRole::Tenant);

		let response = env
			.app
			.post("/reservations")
			.json(&booking(
				pool.id,
				"2026-03-14T10:00:00",
				"2026-03-14T11:00:00",
			))
			.await;

		assert_eq!(response.status_code(), StatusCode::OK);
	}

	let dave = env.store.add_profile("dave");
	env.login(dave.id, ProfileRole::Tenant);

	let response = env
		.app
		.post("/reservations")
		.json(&booking(pool.id, "2026-03-14T10:00:00", "2026-03-14T11:00:00"))
		.await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

	let body = response.json::<serde_json::Value>();
	assert!(
		body["message"].as_str().unwrap().contains("fully booked"),
		"unexpected message: {}",
		body["message"]
	);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_overlapping_reservation_across_amenities() {
	let mut env = TestEnv::new();

	let gym = env.store.add_amenity("Gym", 5, 120);
	let sauna = env.store.add_amenity("Sauna", 5, 120);
	let alice = env.store.add_profile("alice");
	env.login(alice.id, ProfileRole::Tenant);

	let response = env
		.app
		.post("/reservations")
		.json(&booking(gym.id, "2026-03-14T14:00:00", "2026-03-14T15:00:00"))
		.await;
	assert_eq!(response.status_code(), StatusCode::OK);

	let response = env
		.app
		.post("/reservations")
		.json(&booking(
			sauna.id,
			"2026-03-14T14:30:00",
			"2026-03-14T15:30:00",
		))
		.await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_second_reservation_same_amenity_same_day() {
	let mut env = TestEnv::new();

	let gym = env.store.add_amenity("Gym", 5, 120);
	let alice = env.store.add_profile("alice");
	env.login(alice.id, ProfileRole::Tenant);

	let response = env
		.app
		.post("/reservations")
		.json(&booking(gym.id, "2026-03-14T09:00:00", "2026-03-14T10:00:00"))
		.await;
	assert_eq!(response.status_code(), StatusCode::OK);

	let response = env
		.app
		.post("/reservations")
		.json(&booking(gym.id, "2026-03-14T18:00:00", "2026-03-14T19:00:00"))
		.await;

	assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_own_reservations() {
	let mut env = TestEnv::new();

	let gym = env.store.add_amenity("Gym", 5, 120);
	let sauna = env.store.add_amenity("Sauna", 5, 120);
	let alice = env.store.add_profile("alice");
	env.login(alice.id, ProfileRole::Tenant);

	let later = env
		.app
		.post("/reservations")
		.json(&booking(
			sauna.id,
			"2026-03-15T10:00:00",
			"2026-03-15T11:00:00",
		))
		.await
		.json::<ReservationResponse>();
	let earlier = env
		.app
		.post("/reservations")
		.json(&booking(gym.id, "2026-03-14T10:00:00", "2026-03-14T11:00:00"))
		.await
		.json::<ReservationResponse>();

	let response = env.app.get("/reservations").await;
	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<Vec<UserReservationResponse>>();
	assert_eq!(body.len(), 2);
	assert_eq!(body[0].reservation.id, earlier.id);
	assert_eq!(body[0].amenity.name, "Gym");
	assert_eq!(body[1].reservation.id, later.id);
	assert_eq!(body[1].amenity.name, "Sauna");

	// Hidden reservations disappear from the listing
	let response = env
		.app
		.patch(&format!("/reservations/{}/hide", earlier.id))
		.await;
	assert_eq!(response.status_code(), StatusCode::OK);

	let body = env
		.app
		.get("/reservations")
		.await
		.json::<Vec<UserReservationResponse>>();
	assert_eq!(body.len(), 1);
	assert_eq!(body[0].reservation.id, later.id);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_own_reservations_requires_session() {
	let env = TestEnv::new();

	let response = env.app.get("/reservations").await;

	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread")]
async fn cancel_reservation() {
	let mut env = TestEnv::new();

	let gym = env.store.add_amenity("Gym", 5, 120);
	let alice = env.store.add_profile("alice");
	env.login(alice.id, ProfileRole::Tenant);

	let created = env
		.app
		.post("/reservations")
		.json(&booking(gym.id, "2026-03-14T10:00:00", "2026-03-14T11:00:00"))
		.await
		.json::<ReservationResponse>();

	let response = env
		.app
		.patch(&format!("/reservations/{}/cancel", created.id))
		.await;
	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<ReservationResponse>();
	assert_eq!(body.state, ReservationState::Cancelled);
	assert!(!body.hidden_from_user);

	// Cancelling again re-applies the same state
	let response = env
		.app
		.patch(&format!("/reservations/{}/cancel", created.id))
		.await;
	assert_eq!(response.status_code(), StatusCode::OK);
	assert_eq!(
		response.json::<ReservationResponse>().state,
		ReservationState::Cancelled
	);
}

#[tokio::test(flavor = "multi_thread")]
async fn cancel_reservation_of_another_profile() {
	let mut env = TestEnv::new();

	let gym = env.store.add_amenity("Gym", 5, 120);
	let alice = env.store.add_profile("alice");
	let bob = env.store.add_profile("bob");

	env.login(alice.id, ProfileRole::Tenant);
	let created = env
		.app
		.post("/reservations")
		.json(&booking(gym.id, "2026-03-14T10:00:00", "2026-03-14T11:00:00"))
		.await
		.json::<ReservationResponse>();

	env.login(bob.id, ProfileRole::Tenant);
	let response = env
		.app
		.patch(&format!("/reservations/{}/cancel", created.id))
		.await;

	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test(flavor = "multi_thread")]
async fn cancel_unknown_reservation() {
	let mut env = TestEnv::new();

	let alice = env.store.add_profile("alice");
	env.login(alice.id, ProfileRole::Tenant);

	let response = env.app.patch("/reservations/404/cancel").await;

	assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test(flavor = "multi_thread")]
async fn hide_reservation() {
	let mut env = TestEnv::new();

	let gym = env.store.add_amenity("Gym", 5, 120);
	let alice = env.store.add_profile("alice");
	let bob = env.store.add_profile("bob");

	env.login(alice.id, ProfileRole::Tenant);
	let created = env
		.app
		.post("/reservations")
		.json(&booking(gym.id, "2026-03-14T10:00:00", "2026-03-14T11:00:00"))
		.await
		.json::<ReservationResponse>();

	let response = env
		.app
		.patch(&format!("/reservations/{}/hide", created.id))
		.await;
	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<ReservationResponse>();
	assert!(body.hidden_from_user);
	assert_eq!(body.state, ReservationState::Confirmed);

	// Hiding is an owner-only operation too
	env.login(bob.id, ProfileRole::Tenant);
	let response = env
		.app
		.patch(&format!("/reservations/{}/hide", created.id))
		.await;
	assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test(flavor = "multi_thread")]
async fn get_amenity_reservations() {
	let mut env = TestEnv::new();

	let gym = env.store.add_amenity("Gym", 5, 120);
	let alice = env.store.add_profile("alice");
	let bob = env.store.add_profile("bob");

	env.login(alice.id, ProfileRole::Tenant);
	env.app
		.post("/reservations")
		.json(&booking(gym.id, "2026-03-14T10:00:00", "2026-03-14T11:00:00"))
		.await
		.json::<ReservationResponse>();

	env.login(bob.id, ProfileRole::Tenant);
	let cancelled = env
		.app
		.post("/reservations")
		.json(&booking(gym.id, "2026-03-15T10:00:00", "2026-03-15T11:00:00"))
		.await
		.json::<ReservationResponse>();
	env.app
		.patch(&format!("/reservations/{}/cancel", cancelled.id))
		.await;
	env.app
		.post("/reservations")
		.json(&booking(gym.id, "2026-03-16T10:00:00", "2026-03-16T11:00:00"))
		.await
		.json::<ReservationResponse>();

	// Only confirmed rows appear, annotated with their owner
	let response =
		env.app.get(&format!("/reservations/amenity/{}", gym.id)).await;
	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<Vec<AmenityReservationResponse>>();
	assert_eq!(body.len(), 2);
	assert_eq!(body[0].profile.username, "alice");
	assert_eq!(body[1].profile.username, "bob");

	// Restricting to a single day keeps only that day's rows
	let response = env
		.app
		.get(&format!(
			"/reservations/amenity/{}?startDate=2026-03-14&endDate=2026-03-14",
			gym.id
		))
		.await;
	assert_eq!(response.status_code(), StatusCode::OK);

	let body = response.json::<Vec<AmenityReservationResponse>>();
	assert_eq!(body.len(), 1);
	assert_eq!(body[0].profile.username, "alice");
}

#[tokio::test(flavor = "multi_thread")]
async fn get_amenity_reservations_requires_session() {
	let env = TestEnv::new();

	let gym = env.store.add_amenity("Gym", 5, 120);

	let response =
		env.app.get(&format!("/reservations/amenity/{}", gym.id)).await;

	assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}
