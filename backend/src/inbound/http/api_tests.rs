//! End-to-end handler tests against an isolated in-memory store.

use actix_http::Request;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use crate::Trace;
use crate::domain::TRACE_ID_HEADER;
use crate::domain::UserId;
use crate::inbound::http::api_routes;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::test_utils::in_memory_state;
use crate::inbound::http::validation::INVALID_JSON_MESSAGE;

fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(state).wrap(Trace).configure(api_routes)
}

async fn send<S>(app: &S, request: Request) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response = actix_test::call_service(app, request).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("response body is JSON")
    };
    (status, value)
}

fn post_json(uri: &str, token: Option<&str>, body: &Value) -> Request {
    let mut request = actix_test::TestRequest::post().uri(uri).set_json(body);
    if let Some(token) = token {
        request = request.insert_header((header::AUTHORIZATION, format!("Bearer {token}")));
    }
    request.to_request()
}

fn get(uri: &str, token: Option<&str>) -> Request {
    let mut request = actix_test::TestRequest::get().uri(uri);
    if let Some(token) = token {
        request = request.insert_header((header::AUTHORIZATION, format!("Bearer {token}")));
    }
    request.to_request()
}

/// Register an account and return its token and id.
async fn register<S>(app: &S, username: &str, role: &str) -> (String, i64)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, body) = send(
        app,
        post_json(
            "/auth/register",
            None,
            &json!({ "username": username, "password": "pw123", "role": role }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "registration failed: {body}");
    let token = body["token"].as_str().expect("token").to_owned();
    let id = body["user"]["id"].as_i64().expect("user id");
    (token, id)
}

#[actix_web::test]
async fn registration_returns_a_token_for_the_stored_user() {
    let state = in_memory_state();
    let app = actix_test::init_service(test_app(state.clone())).await;

    let (status, body) = send(
        &app,
        post_json(
            "/auth/register",
            None,
            &json!({ "username": " alice ", "password": "pw123", "role": "user" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"]["created_at"].is_string());
    assert!(body["user"].get("password_hash").is_none());

    let token = body["token"].as_str().expect("token");
    let identity = state.tokens.verify(token).expect("token verifies");
    assert_eq!(
        identity.user_id(),
        UserId::new(body["user"]["id"].as_i64().expect("id"))
    );
    assert_eq!(identity.username(), "alice");
}

#[actix_web::test]
async fn duplicate_usernames_conflict() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    register(&app, "alice", "user").await;

    let (status, body) = send(
        &app,
        post_json(
            "/auth/register",
            None,
            &json!({ "username": "alice", "password": "other", "role": "provider" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "conflict");
    assert_eq!(body["message"], "Username already exists");
}

#[rstest]
#[case(json!({ "username": "bob", "password": "pw" }))]
#[case(json!({ "username": "bob", "password": "pw", "role": "admin" }))]
#[case(json!({ "username": "  ", "password": "pw", "role": "user" }))]
#[case(json!({ "username": "bob", "role": "user" }))]
#[actix_web::test]
async fn incomplete_registrations_are_rejected(#[case] payload: Value) {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let (status, body) = send(&app, post_json("/auth/register", None, &payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(
        body["message"],
        "username, password, role(user/provider) required"
    );
}

#[rstest]
#[case(json!({ "username": "alice", "password": "wrong" }))]
#[case(json!({ "username": "nobody", "password": "pw123" }))]
#[case(json!({ "username": "alice" }))]
#[case(json!({}))]
#[actix_web::test]
async fn failed_logins_are_indistinguishable(#[case] payload: Value) {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    register(&app, "alice", "user").await;

    let (status, body) = send(&app, post_json("/auth/login", None, &payload)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[actix_web::test]
async fn login_returns_a_fresh_session() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let (_, id) = register(&app, "alice", "user").await;

    let (status, body) = send(
        &app,
        post_json(
            "/auth/login",
            None,
            &json!({ "username": "alice", "password": "pw123" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], id);
    assert!(body["token"].as_str().is_some_and(|token| !token.is_empty()));
}

#[actix_web::test]
async fn nurse_booking_scenario() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let (token, id) = register(&app, "alice", "user").await;

    let (status, booking) = send(
        &app,
        post_json(
            "/nurse/book",
            Some(&token),
            &json!({ "area": "Koramangala", "hours": 3, "total": 1 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(booking["user_id"], id);
    assert_eq!(booking["area"], "Koramangala");
    assert_eq!(booking["rate_per_hour"], 200);
    assert_eq!(booking["total"], 600);

    send(
        &app,
        post_json(
            "/nurse/book",
            Some(&token),
            &json!({ "area": "HSR Layout", "hours": 1 }),
        ),
    )
    .await;
    let (status, list) = send(&app, get("/nurse/my", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    let areas: Vec<&str> = list
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|row| row["area"].as_str())
        .collect();
    assert_eq!(areas, ["HSR Layout", "Koramangala"]);
}

#[actix_web::test]
async fn subscription_scenario() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let (token, _) = register(&app, "alice", "user").await;

    let (status, body) = send(
        &app,
        post_json(
            "/subscriptions",
            Some(&token),
            &json!({ "type": "night", "days": 5 }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "night");
    assert_eq!(body["rate_per_day"], 1000);
    assert_eq!(body["total"], 5000);

    let (_, list) = send(&app, get("/subscriptions/my", Some(&token))).await;
    assert_eq!(list.as_array().map(Vec::len), Some(1));
}

#[rstest]
#[case(json!(1.5), 1500)]
#[case(json!(0.25), 250)]
#[case(json!(2), 2000)]
#[actix_web::test]
async fn fractional_days_are_priced_and_rounded(#[case] days: Value, #[case] total: i64) {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let (token, _) = register(&app, "alice", "user").await;

    let (status, body) = send(
        &app,
        post_json(
            "/subscriptions",
            Some(&token),
            &json!({ "type": "day", "days": days }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "unexpected body: {body}");
    assert_eq!(body["days"].as_f64(), days.as_f64());
    assert_eq!(body["total"], total);
}

#[actix_web::test]
async fn ambulance_scenario() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let (token, _) = register(&app, "alice", "user").await;

    let (status, body) = send(
        &app,
        post_json(
            "/ambulance/book",
            Some(&token),
            &json!({ "distance_km": 4.5, "pickup_address": "X" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["distance_km"], 4.5);
    assert_eq!(body["rate_per_km"], 50);
    assert_eq!(body["total"], 225);

    let (_, list) = send(&app, get("/ambulance/my", Some(&token))).await;
    assert_eq!(list[0]["pickup_address"], "X");
}

#[rstest]
#[case("/nurse/book", json!({ "area": "Koramangala", "hours": 0 }), "area and positive hours required")]
#[case("/nurse/book", json!({ "area": "Koramangala", "hours": -1 }), "area and positive hours required")]
#[case("/nurse/book", json!({ "hours": 2 }), "area and positive hours required")]
#[case("/subscriptions", json!({ "type": "day", "days": 0 }), "type(day/night) and positive days required")]
#[case("/subscriptions", json!({ "type": "weekly", "days": 2 }), "type(day/night) and positive days required")]
#[case("/ambulance/book", json!({ "distance_km": 0, "pickup_address": "X" }), "positive distance_km and pickup_address required")]
#[case("/ambulance/book", json!({ "distance_km": 2.0 }), "positive distance_km and pickup_address required")]
#[case("/addresses", json!({ "line1": "12 MG Road" }), "line1 and city required")]
#[actix_web::test]
async fn invalid_bookings_are_rejected(
    #[case] uri: &str,
    #[case] payload: Value,
    #[case] message: &str,
) {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let (token, _) = register(&app, "alice", "user").await;

    let (status, body) = send(&app, post_json(uri, Some(&token), &payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["message"], message);
    assert!(body["details"]["field"].is_string());
}

#[rstest]
#[case(json!({ "area": "Koramangala", "hours": "three" }))]
#[case(json!({ "area": "Koramangala", "hours": 2.5 }))]
#[case(json!("just a string"))]
#[actix_web::test]
async fn mistyped_bodies_are_validation_errors(#[case] payload: Value) {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let (token, _) = register(&app, "alice", "user").await;

    let (status, body) = send(&app, post_json("/nurse/book", Some(&token), &payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["code"], "invalid_json");
}

#[actix_web::test]
async fn malformed_json_is_a_validation_error() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let (token, _) = register(&app, "alice", "user").await;

    let request = actix_test::TestRequest::post()
        .uri("/nurse/book")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"area\": ")
        .to_request();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert!(body["traceId"].is_string());
}

#[rstest]
#[case("{\"note\":5}")]
#[case("{not json")]
#[case("\"just a note\"")]
#[actix_web::test]
async fn guidance_rejects_malformed_bodies(#[case] payload: &'static str) {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let (token, _) = register(&app, "alice", "user").await;

    let request = actix_test::TestRequest::post()
        .uri("/guidance")
        .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload(payload)
        .to_request();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], INVALID_JSON_MESSAGE);
    assert_eq!(body["details"]["code"], "invalid_json");

    let (_, mine) = send(&app, get("/guidance/my", Some(&token))).await;
    assert_eq!(mine.as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn mistyped_bodies_do_not_leak_parser_detail() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let (token, _) = register(&app, "alice", "user").await;

    let (status, body) = send(
        &app,
        post_json(
            "/nurse/book",
            Some(&token),
            &json!({ "area": "HSR", "hours": "three" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], INVALID_JSON_MESSAGE);
}

#[rstest]
#[case("/addresses")]
#[case("/nurse/my")]
#[case("/subscriptions/my")]
#[case("/guidance/my")]
#[case("/ambulance/my")]
#[case("/provider/requests")]
#[actix_web::test]
async fn protected_routes_require_a_token(#[case] uri: &str) {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let (status, body) = send(&app, get(uri, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "No token");

    let (status, body) = send(&app, get(uri, Some("not-a-jwt"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token");
}

#[actix_web::test]
async fn authentication_precedes_body_validation() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let request = actix_test::TestRequest::post()
        .uri("/nurse/book")
        .insert_header((header::AUTHORIZATION, "Bearer forged"))
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("not json")
        .to_request();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token");
}

#[actix_web::test]
async fn users_cannot_reach_the_provider_queue() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let (token, _) = register(&app, "alice", "user").await;

    let (status, body) = send(&app, get("/provider/requests", Some(&token))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Forbidden");

    let (status, _) = send(
        &app,
        post_json("/provider/requests/1/resolve", Some(&token), &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn providers_work_the_guidance_queue() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let (alice, _) = register(&app, "alice", "user").await;
    let (bob, _) = register(&app, "bob", "user").await;
    let (provider, _) = register(&app, "nina", "provider").await;

    let (status, first) = send(
        &app,
        post_json("/guidance", Some(&alice), &json!({ "note": "Dressing change" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["status"], "pending");
    let request = actix_test::TestRequest::post()
        .uri("/guidance")
        .insert_header((header::AUTHORIZATION, format!("Bearer {bob}")))
        .to_request();
    let (status, second) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["note"], Value::Null);

    let (status, pending) = send(&app, get("/provider/requests", Some(&provider))).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = pending
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|row| row["id"].as_i64())
        .collect();
    assert_eq!(ids, [second["id"].as_i64().expect("id"), first["id"].as_i64().expect("id")]);

    let uri = format!("/provider/requests/{}/resolve", first["id"]);
    let (status, body) = send(&app, post_json(&uri, Some(&provider), &json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));

    let (_, pending) = send(&app, get("/provider/requests", Some(&provider))).await;
    assert_eq!(pending.as_array().map(Vec::len), Some(1));
    let (_, mine) = send(&app, get("/guidance/my", Some(&alice))).await;
    assert_eq!(mine[0]["status"], "resolved");
}

#[actix_web::test]
async fn resolving_an_unknown_request_is_a_no_op() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let (provider, _) = register(&app, "nina", "provider").await;

    let (status, body) = send(
        &app,
        post_json("/provider/requests/999/resolve", Some(&provider), &json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "ok": true }));
}

#[actix_web::test]
async fn non_numeric_request_ids_are_rejected() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let (provider, _) = register(&app, "nina", "provider").await;

    let (status, body) = send(
        &app,
        post_json("/provider/requests/abc/resolve", Some(&provider), &json!({})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], "invalid_path");
}

#[actix_web::test]
async fn addresses_list_in_insertion_order_and_stay_private() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;
    let (alice, _) = register(&app, "alice", "user").await;
    let (bob, _) = register(&app, "bob", "user").await;

    let (status, home) = send(
        &app,
        post_json(
            "/addresses",
            Some(&alice),
            &json!({ "label": "Home", "line1": "12 MG Road", "city": "Bengaluru", "pincode": "" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(home["pincode"], Value::Null);
    assert_eq!(home["state"], Value::Null);
    send(
        &app,
        post_json(
            "/addresses",
            Some(&alice),
            &json!({ "line1": "4 Residency Rd", "city": "Bengaluru" }),
        ),
    )
    .await;

    let (_, mine) = send(&app, get("/addresses", Some(&alice))).await;
    let lines: Vec<&str> = mine
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|row| row["line1"].as_str())
        .collect();
    assert_eq!(lines, ["12 MG Road", "4 Residency Rd"]);

    let (_, theirs) = send(&app, get("/addresses", Some(&bob))).await;
    assert_eq!(theirs, json!([]));
}

#[actix_web::test]
async fn responses_carry_a_trace_id() {
    let app = actix_test::init_service(test_app(in_memory_state())).await;

    let response = actix_test::call_service(&app, get("/nurse/my", None)).await;

    assert!(response.headers().contains_key(TRACE_ID_HEADER));
}
