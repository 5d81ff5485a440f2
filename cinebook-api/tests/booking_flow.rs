use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{NaiveDate, NaiveTime};
use cinebook_api::{app, AppState};
use cinebook_booking::{BookingRules, BookingStore};
use cinebook_catalog::{CatalogRepository, Movie, Screening, Snack, SnackCategory};
use cinebook_store::MemoryStore;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

struct TestApp {
    app: Router,
    store: Arc<MemoryStore>,
    screening_id: Uuid,
    snack_id: Uuid,
}

fn test_app() -> TestApp {
    test_app_with_seats(2)
}

fn test_app_with_seats(available_seats: i32) -> TestApp {
    let store = Arc::new(MemoryStore::new());

    let movie = Movie::new(
        "Black Panther".to_string(),
        "English".to_string(),
        "Action, Superhero".to_string(),
        9.5,
        "Wakanda forever".to_string(),
        250,
        8.0,
        134,
        "13+".to_string(),
    );
    let mut screening = Screening::new(
        movie.movie_id,
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
        NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
        100,
        1.2,
    );
    screening.available_seats = available_seats;
    let snack = Snack::new("Large Popcorn".to_string(), 150, SnackCategory::Popcorn);

    let screening_id = screening.screening_id;
    let snack_id = snack.snack_id;

    store.insert_movie(movie);
    store.insert_screening(screening);
    store.insert_snack(snack);

    let state = AppState::from_store(store.clone(), BookingRules::default());

    TestApp {
        app: app(state),
        store,
        screening_id,
        snack_id,
    }
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn json_request_with_cookie(method: &str, uri: &str, cookie: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, cookie)
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register a user and return the session cookie pair.
async fn register(app: &Router, username: &str, email: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/register",
            json!({
                "fullname": "Test Person",
                "username": username,
                "email": email,
                "phone": "9876543210",
                "password": "Str0ng!pass",
                "confirm_password": "Str0ng!pass",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("registration sets a session cookie")
        .to_str()
        .unwrap();
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));

    set_cookie
        .split(';')
        .next()
        .unwrap()
        .trim()
        .to_string()
}

#[tokio::test]
async fn test_booking_requires_session() {
    let tx = test_app();

    let response = tx
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/book",
            json!({ "screening_id": tx.screening_id, "seats_booked": 1, "snacks": [] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Authentication required");
}

#[tokio::test]
async fn test_garbage_session_cookie_rejected() {
    let tx = test_app();

    let response = tx
        .app
        .clone()
        .oneshot(json_request_with_cookie(
            "POST",
            "/api/book",
            "session_token=not-a-real-token",
            json!({ "screening_id": tx.screening_id, "seats_booked": 1, "snacks": [] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_booking_happy_path_with_snacks() {
    let tx = test_app();
    let cookie = register(&tx.app, "movie_fan", "fan@example.com").await;

    let response = tx
        .app
        .clone()
        .oneshot(json_request_with_cookie(
            "POST",
            "/api/book",
            &cookie,
            json!({
                "screening_id": tx.screening_id,
                "seats_booked": 2,
                "snacks": [{ "snack_id": tx.snack_id, "quantity": 2 }],
                "total_amount": 948,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Booking confirmed successfully");
    let booking_id: Uuid = body["booking_id"].as_str().unwrap().parse().unwrap();

    // round(270 * 1.2) * 2 + 2 * 150 = 948, seats 2 -> 0
    let booking = tx.store.get_booking(booking_id).await.unwrap().unwrap();
    assert_eq!(booking.total_amount, 948);
    assert_eq!(booking.snacks_total, 300);

    let screening = tx
        .store
        .get_screening(tx.screening_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(screening.available_seats, 0);

    // The line items carry the snapshot price and belong to this session.
    let response = tx
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/bookings/{booking_id}/snacks"))
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let items = body_json(response).await;
    assert_eq!(items[0]["quantity"], 2);
    assert_eq!(items[0]["price_per_item"], 150);

    // A different user sees 404, not the line items.
    let other = register(&tx.app, "other_fan", "other@example.com").await;
    let response = tx
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/api/bookings/{booking_id}/snacks"))
                .header(header::COOKIE, &other)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_screening_is_404() {
    let tx = test_app();
    let cookie = register(&tx.app, "movie_fan", "fan@example.com").await;

    let response = tx
        .app
        .clone()
        .oneshot(json_request_with_cookie(
            "POST",
            "/api/book",
            &cookie,
            json!({ "screening_id": Uuid::new_v4(), "seats_booked": 1, "snacks": [] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Screening not found");
}

#[tokio::test]
async fn test_overbooking_is_400_with_availability_message() {
    let tx = test_app_with_seats(2);
    let cookie = register(&tx.app, "movie_fan", "fan@example.com").await;

    let response = tx
        .app
        .clone()
        .oneshot(json_request_with_cookie(
            "POST",
            "/api/book",
            &cookie,
            json!({ "screening_id": tx.screening_id, "seats_booked": 3, "snacks": [] }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Only 2 seats available");

    let screening = tx
        .store
        .get_screening(tx.screening_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(screening.available_seats, 2);
}

#[tokio::test]
async fn test_tampered_total_rejected() {
    let tx = test_app();
    let cookie = register(&tx.app, "movie_fan", "fan@example.com").await;

    let response = tx
        .app
        .clone()
        .oneshot(json_request_with_cookie(
            "POST",
            "/api/book",
            &cookie,
            json!({ "screening_id": tx.screening_id, "seats_booked": 1, "snacks": [], "total_amount": 1 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_duplicate_username_conflicts() {
    let tx = test_app();
    register(&tx.app, "movie_fan", "fan@example.com").await;

    let response = tx
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/register",
            json!({
                "fullname": "Other Person",
                "username": "movie_fan",
                "email": "other@example.com",
                "phone": "9876543210",
                "password": "Str0ng!pass",
                "confirm_password": "Str0ng!pass",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Username already exists");
}

#[tokio::test]
async fn test_register_rejects_weak_password() {
    let tx = test_app();

    let response = tx
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/register",
            json!({
                "fullname": "Test Person",
                "username": "movie_fan",
                "email": "fan@example.com",
                "phone": "9876543210",
                "password": "weak",
                "confirm_password": "weak",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_and_book() {
    let tx = test_app();
    register(&tx.app, "movie_fan", "fan@example.com").await;

    let response = tx
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/login",
            json!({ "username": "movie_fan", "password": "Str0ng!pass" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();

    let response = tx
        .app
        .clone()
        .oneshot(json_request_with_cookie(
            "POST",
            "/api/book",
            &cookie,
            json!({ "screening_id": tx.screening_id, "seats_booked": 1, "snacks": [] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_wrong_password_unauthorized() {
    let tx = test_app();
    register(&tx.app, "movie_fan", "fan@example.com").await;

    let response = tx
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/login",
            json!({ "username": "movie_fan", "password": "Wr0ng!pass" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid username or password");
}

#[tokio::test]
async fn test_logout_revokes_session() {
    let tx = test_app();
    let cookie = register(&tx.app, "movie_fan", "fan@example.com").await;

    let response = tx
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/logout")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.status().is_redirection());

    // The old token no longer authenticates anything.
    let response = tx
        .app
        .clone()
        .oneshot(json_request_with_cookie(
            "POST",
            "/api/book",
            &cookie,
            json!({ "screening_id": tx.screening_id, "seats_booked": 1, "snacks": [] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_movie_listing_includes_screenings() {
    let tx = test_app();

    let response = tx
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/movies")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let movies = body.as_array().unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0]["movie_name"], "Black Panther");
    assert_eq!(movies[0]["screenings"].as_array().unwrap().len(), 1);
    assert_eq!(movies[0]["net_amount"], 270);
}

#[tokio::test]
async fn test_listing_bookings_is_scoped_to_session_user() {
    let tx = test_app_with_seats(10);
    let first = register(&tx.app, "first_fan", "first@example.com").await;
    let second = register(&tx.app, "second_fan", "second@example.com").await;

    let response = tx
        .app
        .clone()
        .oneshot(json_request_with_cookie(
            "POST",
            "/api/book",
            &first,
            json!({ "screening_id": tx.screening_id, "seats_booked": 1, "snacks": [] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = tx
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/bookings")
                .header(header::COOKIE, &second)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body.as_array().unwrap().is_empty());
}
