mod common;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use common::{ADMIN_PASSWORD, setup};
use studio_recruit::routes;
use studio_recruit::utils::{json_error_handler, query_error_handler};

macro_rules! init_app {
    ($ctx:expr) => {{
        let services = $ctx.services.clone();
        test::init_service(
            App::new()
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .configure(move |cfg| services.register(cfg))
                .configure(routes::configure_api),
        )
        .await
    }};
}

fn register_body(username: &str) -> Value {
    json!({
        "username": username,
        "password": "secret1",
        "nickname": format!("{username}-nick"),
        "real_name": "Real Name",
        "college": "Computer Science",
        "student_id": "2024001",
        "email": format!("{username}@example.com")
    })
}

macro_rules! login_token {
    ($app:expr, $username:expr, $password:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "username": $username, "password": $password }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&$app, req).await;
        assert_eq!(body["code"], 0, "login failed: {body}");
        body["data"]["token"]
            .as_str()
            .expect("token in login response")
            .to_string()
    }};
}

#[actix_web::test]
async fn register_login_and_profile() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(register_body("alice"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["username"], "alice");
    assert!(body["data"].get("password_hash").is_none());

    let token = login_token!(app, "alice", "secret1");

    let req = test::TestRequest::get()
        .uri("/api/user/profile")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["nickname"], "alice-nick");
    assert_eq!(body["data"]["is_admin"], false);
}

#[actix_web::test]
async fn duplicate_registration_returns_business_code() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    for expected in [0, 1002] {
        let req = test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(register_body("alice"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], expected);
    }
}

#[actix_web::test]
async fn wrong_password_is_rejected() {
    let ctx = setup().await;
    ctx.register("alice").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "username": "alice", "password": "nope-nope" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["code"], 1003);
    assert!(body.get("data").is_none());
}

#[actix_web::test]
async fn profile_requires_valid_token() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/api/user/profile").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1004);

    let req = test::TestRequest::get()
        .uri("/api/user/profile")
        .insert_header(("Authorization", "Bearer not.a.token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1006);
}

#[actix_web::test]
async fn admin_routes_require_admin_role() {
    let ctx = setup().await;
    ctx.register("alice").await;
    let app = init_app!(ctx);

    let user_token = login_token!(app, "alice", "secret1");
    let req = test::TestRequest::get()
        .uri("/api/admin/users")
        .insert_header(("Authorization", format!("Bearer {user_token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 1005);

    let admin_token = login_token!(app, "admin", ADMIN_PASSWORD);
    let req = test::TestRequest::get()
        .uri("/api/admin/users?page=1&page_size=10")
        .insert_header(("Authorization", format!("Bearer {admin_token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(2));
}

#[actix_web::test]
async fn malformed_json_returns_bind_error() {
    let ctx = setup().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{\"username\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 3002);
}

#[actix_web::test]
async fn directions_and_ranking_are_public() {
    let ctx = setup().await;
    let admin = ctx.admin_actor().await;
    let alice = ctx.register("alice").await;
    let direction = ctx.direction("Backend", vec![]).await;
    ctx.problem(admin, direction.id, "Build an API").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/api/directions").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["data"]["items"][0]["name"], "Backend");

    let req = test::TestRequest::get()
        .uri(&format!("/api/directions/{}", direction.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["problems"][0]["title"], "Build an API");

    let req = test::TestRequest::get()
        .uri("/api/directions/9999")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["code"], 2001);

    let req = test::TestRequest::get()
        .uri(&format!("/api/ranking?direction_id={}&limit=5", direction.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["code"], 0);
    let items = body["data"]["items"].as_array().expect("ranking items");
    assert!(items.iter().any(|item| item["user_id"] == alice.id));
    assert!(items.iter().all(|item| item["score"] == 0));
}

#[actix_web::test]
async fn submit_and_score_over_http() {
    let ctx = setup().await;
    let admin = ctx.admin_actor().await;
    ctx.register("alice").await;
    let manager = ctx.register("manager").await;
    let direction = ctx.direction("Backend", vec![manager.id]).await;
    let problem = ctx.problem(admin, direction.id, "Build an API").await;
    let point = ctx.point(admin, problem.id, "Code", 100).await;
    let app = init_app!(ctx);

    let alice_token = login_token!(app, "alice", "secret1");
    let req = test::TestRequest::post()
        .uri("/api/submissions")
        .insert_header(("Authorization", format!("Bearer {alice_token}")))
        .set_json(json!({
            "problem_id": problem.id,
            "submission_point_id": point.id,
            "content": "http://repo"
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["code"], 0);
    let submission_id = body["data"]["id"].as_i64().expect("submission id");

    let manager_token = login_token!(app, "manager", "secret1");
    let req = test::TestRequest::get()
        .uri("/api/admin/submissions/review")
        .insert_header(("Authorization", format!("Bearer {manager_token}")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["items"][0]["id"], submission_id);

    let req = test::TestRequest::post()
        .uri("/api/admin/scores")
        .insert_header(("Authorization", format!("Bearer {manager_token}")))
        .set_json(json!({ "submission_id": submission_id, "score": 85, "comment": "ok" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["code"], 0);

    // 普通用户对不负责的提交评分返回 403
    let req = test::TestRequest::post()
        .uri("/api/admin/scores")
        .insert_header(("Authorization", format!("Bearer {alice_token}")))
        .set_json(json!({ "submission_id": submission_id, "score": 100 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri(&format!("/api/submissions/{submission_id}"))
        .insert_header(("Authorization", format!("Bearer {alice_token}")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total_score"], 85);
    assert_eq!(body["data"]["scores"][0]["score"], 85);

    let req = test::TestRequest::get().uri("/api/ranking").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["items"][0]["nickname"], "alice-nick");
    assert_eq!(body["data"]["items"][0]["score"], 85);
}
