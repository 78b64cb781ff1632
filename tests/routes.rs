use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::{Duration, Utc};
use serde_json::{Value, json};
use tourbase::configure_api;
use tourbase::domain::user::{NewUser, UserRole};
use tourbase::models::auth;
use tourbase::models::config::ServerConfig;
use tourbase::repository::{DieselRepository, UserWriter};

mod common;

const TEST_SECRET: &str = "route-test-secret";

fn server_config() -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".to_string(),
        port: 8080,
        database_url: "unused.db".to_string(),
        secret: TEST_SECRET.to_string(),
        token_ttl_hours: 1,
        bonus_expiry_days: 365,
    }
}

fn register_body(username: &str) -> Value {
    json!({
        "name": "Ana",
        "surname": "Ivic",
        "email": format!("{username}@example.com"),
        "username": username,
        "password": "hunter2",
        "interestsIds": [1, 3],
    })
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

/// Creates a guide directly in the database and returns a token for them.
/// Registration only produces tourists, so tests mint guide tokens here.
fn seed_guide(repo: &DieselRepository, username: &str) -> String {
    let guide = repo
        .create_user(&NewUser::new(
            username.to_string(),
            format!("{username}@example.com"),
            "hash".to_string(),
            "Goran".to_string(),
            "Vodic".to_string(),
            UserRole::Guide,
        ))
        .unwrap();
    auth::issue_token(&guide, TEST_SECRET, 1).unwrap()
}

#[actix_web::test]
async fn test_register_login_and_profile_flow() {
    let test_db = common::TestDb::new("test_register_login_and_profile_flow.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config()))
            .service(web::scope("/api").configure(configure_api)),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/users/register")
            .set_json(register_body("ana"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let profile: Value = test::read_body_json(resp).await;
    assert_eq!(profile["email"], "ana@example.com");
    assert_eq!(profile["interestIds"], json!([1, 3]));

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/users/register")
            .set_json(register_body("ana"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let conflict: Value = test::read_body_json(resp).await;
    assert_eq!(conflict["errors"][0], "Username is already taken");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/users/login")
            .set_json(json!({"username": "ana", "password": "wrong-password"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/users/login")
            .set_json(json!({"username": "ana", "password": "hunter2"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let login: Value = test::read_body_json(resp).await;
    assert_eq!(login["role"], "tourist");
    let token = login["accessToken"].as_str().unwrap().to_string();
    assert!(!token.is_empty());

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/tourist/profile").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/tourist/profile")
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let profile: Value = test::read_body_json(resp).await;
    assert_eq!(profile["interestIds"], json!([1, 3]));
    assert_eq!(profile["receiveRecommendations"], false);

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri("/api/tourist/profile")
            .insert_header(bearer(&token))
            .set_json(json!({"interestIds": [2], "receiveRecommendations": true}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let profile: Value = test::read_body_json(resp).await;
    assert_eq!(profile["interestIds"], json!([2]));
    assert_eq!(profile["receiveRecommendations"], true);
}

#[actix_web::test]
async fn test_login_blocks_after_repeated_failures() {
    let test_db = common::TestDb::new("test_login_blocks_after_repeated_failures.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config()))
            .service(web::scope("/api").configure(configure_api)),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/users/register")
            .set_json(register_body("bojan"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    for _ in 0..2 {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/users/login")
                .set_json(json!({"username": "bojan", "password": "wrong-password"}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    // Third failure trips the block.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/users/login")
            .set_json(json!({"username": "bojan", "password": "wrong-password"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/users/login")
            .set_json(json!({"username": "bojan", "password": "hunter2"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_interest_catalog_is_public() {
    let test_db = common::TestDb::new("test_interest_catalog_is_public.db");
    let repo = DieselRepository::new(test_db.pool());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config()))
            .service(web::scope("/api").configure(configure_api)),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/users/interests").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let interests: Value = test::read_body_json(resp).await;
    let entries = interests.as_array().unwrap();
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0], json!({"id": 1, "name": "Nature"}));
}

#[actix_web::test]
async fn test_guide_tour_lifecycle_over_http() {
    let test_db = common::TestDb::new("test_guide_tour_lifecycle_over_http.db");
    let repo = DieselRepository::new(test_db.pool());
    let guide_token = seed_guide(&repo, "goran");
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config()))
            .service(web::scope("/api").configure(configure_api)),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/users/register")
            .set_json(register_body("ana"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/users/login")
            .set_json(json!({"username": "ana", "password": "hunter2"}))
            .to_request(),
    )
    .await;
    let login: Value = test::read_body_json(resp).await;
    let tourist_token = login["accessToken"].as_str().unwrap().to_string();

    // Tourists cannot reach the authoring endpoints.
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/author/tours")
            .insert_header(bearer(&tourist_token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let date = (Utc::now() + Duration::days(30)).to_rfc3339();
    let tour_body = json!({
        "name": "City walk",
        "description": "A relaxed walk with plenty of stops",
        "difficulty": 2,
        "category": 1,
        "price": 30.0,
        "date": date,
    });
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/author/tours")
            .insert_header(bearer(&guide_token))
            .set_json(tour_body.clone())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let tour: Value = test::read_body_json(resp).await;
    assert_eq!(tour["state"], 0);
    let tour_id = tour["id"].as_i64().unwrap();

    // Publishing needs at least two key points.
    let mut publish_body = tour_body.clone();
    publish_body["state"] = json!(1);
    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/author/tours/{tour_id}"))
            .insert_header(bearer(&guide_token))
            .set_json(publish_body.clone())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    for (order, name) in [(1, "Main square"), (2, "Town hall")] {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/author/keypoints")
                .insert_header(bearer(&guide_token))
                .set_json(json!({
                    "tourId": tour_id,
                    "name": name,
                    "description": "A stop along the walk with some history",
                    "latitude": 45.26,
                    "longitude": 19.85,
                    "order": order,
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/author/keypoints/tour/{tour_id}"))
            .insert_header(bearer(&guide_token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let keypoints: Value = test::read_body_json(resp).await;
    assert_eq!(keypoints.as_array().unwrap().len(), 2);
    assert_eq!(keypoints[0]["order"], 1);

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/author/tours/{tour_id}"))
            .insert_header(bearer(&guide_token))
            .set_json(publish_body)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let published: Value = test::read_body_json(resp).await;
    assert_eq!(published["state"], 1);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/tourist/tours")
            .insert_header(bearer(&tourist_token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let catalogue: Value = test::read_body_json(resp).await;
    assert_eq!(catalogue["totalCount"], 1);
    assert_eq!(catalogue["results"][0]["name"], "City walk");

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/tourist/tours/{tour_id}"))
            .insert_header(bearer(&tourist_token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/tourist/tours/9999")
            .insert_header(bearer(&tourist_token))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
