use axum::Json;
use serde_json::{json, Value};

use crate::dto::StatusResponse;

/// Root readiness message polled by the hosting platform
pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "MoodMate API is connected and ready.".into(),
    })
}

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "moodmate-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
