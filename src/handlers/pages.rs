use axum::response::Html;
use axum::Json;
use serde_json::json;

static APP_HTML: &str = include_str!("../web/index.html");

// GET /app
pub async fn app_page() -> Html<&'static str> {
    Html(APP_HTML)
}

// GET /
pub async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Welcome to SwiftCab API" }))
}

// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
