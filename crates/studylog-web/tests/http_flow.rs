//! End-to-end router tests: form submission, validation failures, redirects
//! and the chart endpoint, against a temporary SQLite file.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use studylog_core::RecordService;
use studylog_web::{build_router, AppState};

fn test_router(dir: &tempfile::TempDir) -> Router {
    let state = AppState {
        service: RecordService::new(dir.path().join("test.db")),
        chart_width: 400,
        chart_height: 200,
    };
    build_router(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn add_then_list_shows_scored_record() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(&dir);

    let response = app
        .clone()
        .oneshot(post_form(
            "/add",
            "date_time=2024-01-01+09%3A00&distracted_minutes=10&studied_minutes=50",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("2024-01-01 09:00"));
    // e^(-10/50) = e^(-0.2)
    assert!(body.contains("0.8187"));
}

#[tokio::test]
async fn zero_studied_minutes_is_rejected_without_writing() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(&dir);

    let response = app
        .clone()
        .oneshot(post_form(
            "/add",
            "date_time=2024-01-01+09%3A00&distracted_minutes=10&studied_minutes=0",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_string(response).await;
    assert!(body.contains("studied_minutes"));

    let response = app.oneshot(get("/")).await.unwrap();
    let body = body_string(response).await;
    assert!(body.contains("No records yet"));
}

#[tokio::test]
async fn malformed_inputs_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(&dir);

    // Non-numeric minutes.
    let response = app
        .clone()
        .oneshot(post_form(
            "/add",
            "date_time=2024-01-01+09%3A00&distracted_minutes=ten&studied_minutes=50",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Unparseable timestamp.
    let response = app
        .clone()
        .oneshot(post_form(
            "/add",
            "date_time=yesterday&distracted_minutes=10&studied_minutes=50",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Negative distracted minutes.
    let response = app
        .oneshot(post_form(
            "/add",
            "date_time=2024-01-01+09%3A00&distracted_minutes=-1&studied_minutes=50",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn edit_recomputes_the_score() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(&dir);

    app.clone()
        .oneshot(post_form(
            "/add",
            "date_time=2024-01-01+09%3A00&distracted_minutes=10&studied_minutes=50",
        ))
        .await
        .unwrap();

    // Pre-filled edit form for the first record.
    let response = app.clone().oneshot(get("/edit/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("value=\"2024-01-01 09:00\""));

    let response = app
        .clone()
        .oneshot(post_form(
            "/edit/1",
            "date_time=2024-01-01+09%3A00&distracted_minutes=25&studied_minutes=50",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app.oneshot(get("/")).await.unwrap();
    let body = body_string(response).await;
    // e^(-25/50) = e^(-0.5)
    assert!(body.contains("0.6065"));
    assert!(!body.contains("0.8187"));
}

#[tokio::test]
async fn editing_a_missing_record_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(&dir);

    let response = app.clone().oneshot(get("/edit/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(post_form(
            "/edit/42",
            "date_time=2024-01-01+09%3A00&distracted_minutes=1&studied_minutes=10",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_missing_record_redirects() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(&dir);

    let response = app.oneshot(get("/delete/42")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
}

#[tokio::test]
async fn delete_removes_the_record() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(&dir);

    app.clone()
        .oneshot(post_form(
            "/add",
            "date_time=2024-01-01+09%3A00&distracted_minutes=10&studied_minutes=50",
        ))
        .await
        .unwrap();

    let response = app.clone().oneshot(get("/delete/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app.oneshot(get("/")).await.unwrap();
    let body = body_string(response).await;
    assert!(body.contains("No records yet"));
}

#[tokio::test]
async fn list_is_ordered_by_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(&dir);

    for date in ["2024-01-03", "2024-01-01", "2024-01-02"] {
        app.clone()
            .oneshot(post_form(
                "/add",
                &format!("date_time={date}+09%3A00&distracted_minutes=1&studied_minutes=10"),
            ))
            .await
            .unwrap();
    }

    let response = app.oneshot(get("/")).await.unwrap();
    let body = body_string(response).await;
    let first = body.find("2024-01-01").unwrap();
    let second = body.find("2024-01-02").unwrap();
    let third = body.find("2024-01-03").unwrap();
    assert!(first < second);
    assert!(second < third);
}

#[tokio::test]
async fn plot_returns_a_png() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(&dir);

    app.clone()
        .oneshot(post_form(
            "/add",
            "date_time=2024-01-01+09%3A00&distracted_minutes=10&studied_minutes=50",
        ))
        .await
        .unwrap();

    let response = app.oneshot(get("/plot")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
}

#[tokio::test]
async fn add_form_is_served() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_router(&dir);

    let response = app.oneshot(get("/add")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("name=\"date_time\""));
    assert!(body.contains("name=\"distracted_minutes\""));
    assert!(body.contains("name=\"studied_minutes\""));
}
