//! The "create account" endpoint.
//!
//! Wire contract (preserved exactly):
//! - missing/empty field -> 400 `{"error":"All fields are required"}`
//! - insert failure       -> 400 `{"error":"<message>"}`
//! - success              -> 201 `{"message":"User created successfully"}`
//! - unexpected failure   -> 500 `{"error":"Internal server error"}`

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use log::{error, info};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::password::hash_password;
use crate::AppState;
use corkboard_core::db::gateway;

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub password: String,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> (StatusCode, Json<Value>) {
    if request.email.is_empty() || request.name.is_empty() || request.password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "All fields are required" })),
        );
    }

    let db = state.db.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        let hashed = hash_password(&request.password).map_err(|err| {
            error!("event=signup module=server status=error stage=hash error={err}");
            Failure::Internal
        })?;

        let conn = db.lock().map_err(|_| {
            error!("event=signup module=server status=error stage=lock error=poisoned");
            Failure::Internal
        })?;

        gateway::insert_user(&conn, &request.email, &request.name, &hashed).map_err(|err| {
            error!("event=signup module=server status=failed stage=insert error={err}");
            Failure::Insert(err.to_string())
        })
    })
    .await;

    match outcome {
        Ok(Ok(user)) => {
            info!("event=signup module=server status=ok user_id={}", user.id);
            (
                StatusCode::CREATED,
                Json(json!({ "message": "User created successfully" })),
            )
        }
        Ok(Err(Failure::Insert(message))) => {
            (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
        }
        Ok(Err(Failure::Internal)) | Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Internal server error" })),
        ),
    }
}

enum Failure {
    Insert(String),
    Internal,
}
