//! End-to-end tests over the assembled router.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use db::{
    DBService,
    models::user::{AppRole, CreateProfile, Profile, UserRole},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use server::AppState;
use services::services::{
    auth::{self, SessionService, hash_password},
    media::MediaService,
    storage::StorageService,
};
use tower::ServiceExt;

const ADMIN_EMAIL: &str = "admin@district.example";
const ADMIN_PASSWORD: &str = "verdant-lobby";

async fn test_app() -> (Router, DBService, tempfile::TempDir) {
    let db = DBService::new_in_memory().await.unwrap();
    auth::bootstrap_admin(&db.pool, ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let storage = StorageService::new(dir.path(), "http://localhost:3001");
    let state = AppState {
        db: db.clone(),
        media: MediaService::new(storage.clone()),
        storage,
        sessions: SessionService::new(),
    };
    let app = server::app(state, dir.path(), None);
    (app, db, dir)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn send_json(method: &str, path: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        send_json(
            "POST",
            "/api/admin/auth/login",
            None,
            &json!({"email": email, "password": password}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["data"]["token"].as_str().unwrap().to_string()
}

async fn add_editor(db: &DBService) -> String {
    let profile = Profile::create(
        &db.pool,
        &CreateProfile {
            email: "editor@district.example".to_string(),
            full_name: Some("Content Editor".to_string()),
            password_digest: hash_password("trellis"),
        },
    )
    .await
    .unwrap();
    UserRole::replace_for_user(&db.pool, profile.user_id, Some(AppRole::Editor))
        .await
        .unwrap();
    "editor@district.example".to_string()
}

#[tokio::test]
async fn admin_routes_require_a_session() {
    let (app, _db, _dir) = test_app().await;

    let (status, body) = send(&app, get("/api/admin/projects", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));

    let (status, _) = send(&app, get("/api/admin/projects", Some("bogus-token"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn villa_garden_scenario() {
    let (app, _db, _dir) = test_app().await;
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let (status, body) = send(
        &app,
        send_json(
            "POST",
            "/api/admin/projects",
            Some(&token),
            &json!({"title": "Villa Garden", "location": "Riyadh"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let project = &body["data"];
    assert_eq!(project["slug"], json!("villa-garden"));
    assert_eq!(project["is_published"], json!(false));
    assert_eq!(project["display_order"], json!(0));

    // Draft projects stay off the public surface.
    let (status, body) = send(&app, get("/api/public/projects", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    // Publish toggle brings it on; a second project defaults behind it.
    let id = project["id"].as_str().unwrap().to_string();
    let (status, body) = send(
        &app,
        send_json(
            "POST",
            &format!("/api/admin/projects/{id}/publish"),
            Some(&token),
            &json!({}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_published"], json!(true));

    let (_, body) = send(
        &app,
        send_json(
            "POST",
            "/api/admin/projects",
            Some(&token),
            &json!({"title": "Hotel Atrium", "is_published": true}),
        ),
    )
    .await;
    assert_eq!(body["data"]["display_order"], json!(1));

    let (_, body) = send(&app, get("/api/public/projects", None)).await;
    let slugs: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, ["villa-garden", "hotel-atrium"]);
}

#[tokio::test]
async fn missing_title_is_rejected_before_the_store() {
    let (app, db, _dir) = test_app().await;
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let (status, body) = send(
        &app,
        send_json(
            "POST",
            "/api/admin/projects",
            Some(&token),
            &json!({"title": "   "}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], json!(false));
    assert_eq!(
        db::models::project::Project::count(&db.pool).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn testimonials_fall_back_until_one_is_published() {
    let (app, _db, _dir) = test_app().await;
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let (status, body) = send(&app, get("/api/public/testimonials", None)).await;
    assert_eq!(status, StatusCode::OK);
    let fallback = body["data"].as_array().unwrap();
    assert!(!fallback.is_empty());
    assert_eq!(fallback[0]["client_name"], json!("Sarah Al-Rashid"));

    let (_, body) = send(
        &app,
        send_json(
            "POST",
            "/api/admin/testimonials",
            Some(&token),
            &json!({
                "client_name": "Huda Al-Amri",
                "quote": "The office finally feels alive.",
                "company": "Neom"
            }),
        ),
    )
    .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    // Still draft: fallback content remains.
    let (_, body) = send(&app, get("/api/public/testimonials", None)).await;
    assert_eq!(body["data"][0]["client_name"], json!("Sarah Al-Rashid"));

    send(
        &app,
        send_json(
            "POST",
            &format!("/api/admin/testimonials/{id}/publish"),
            Some(&token),
            &json!({}),
        ),
    )
    .await;

    let (_, body) = send(&app, get("/api/public/testimonials", None)).await;
    let published = body["data"].as_array().unwrap();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0]["client_name"], json!("Huda Al-Amri"));
}

#[tokio::test]
async fn editors_manage_content_but_not_users() {
    let (app, db, _dir) = test_app().await;
    let email = add_editor(&db).await;
    let token = login(&app, &email, "trellis").await;

    let (status, _) = send(&app, get("/api/admin/projects", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, get("/api/admin/users", Some(&token))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn admins_cannot_change_their_own_role() {
    let (app, db, _dir) = test_app().await;
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let admin = Profile::find_by_email(&db.pool, ADMIN_EMAIL)
        .await
        .unwrap()
        .unwrap();
    let (status, _) = send(
        &app,
        send_json(
            "PUT",
            &format!("/api/admin/users/{}/role", admin.user_id),
            Some(&token),
            &json!({"role": "editor"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The other direction works: promote the editor to admin.
    let email = add_editor(&db).await;
    let editor = Profile::find_by_email(&db.pool, &email).await.unwrap().unwrap();
    let (status, _) = send(
        &app,
        send_json(
            "PUT",
            &format!("/api/admin/users/{}/role", editor.user_id),
            Some(&token),
            &json!({"role": "admin"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let role = UserRole::find_by_user_id(&db.pool, editor.user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(role.role, AppRole::Admin);
}

#[tokio::test]
async fn logout_invalidates_the_session() {
    let (app, _db, _dir) = test_app().await;
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let (status, _) = send(&app, get("/api/admin/auth/me", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        send_json("POST", "/api/admin/auth/logout", Some(&token), &json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, get("/api/admin/auth/me", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn deleting_a_missing_record_is_not_found() {
    let (app, _db, _dir) = test_app().await;
    let token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let (status, body) = send(
        &app,
        send_json(
            "DELETE",
            &format!("/api/admin/projects/{}", uuid::Uuid::new_v4()),
            Some(&token),
            &json!({}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
}
