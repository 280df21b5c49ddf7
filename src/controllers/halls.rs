use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{seat, Hall};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/halls", post(create_hall))
        .route("/halls", get(get_all_halls))
        .route("/halls/{id}", get(get_hall_by_id))
        .route("/halls/{id}", delete(delete_hall))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateHallRequest {
    name: String,
    total_rows: i64,
    seats_per_row: i64,
}

// POST /api/halls
async fn create_hall(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateHallRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::Validation("name is required".to_string()));
    }
    if req.total_rows < 1 || req.total_rows > seat::MAX_ROWS {
        return Err(ApiError::Validation(format!(
            "totalRows must be between 1 and {}",
            seat::MAX_ROWS
        )));
    }
    if req.seats_per_row < 1 {
        return Err(ApiError::Validation("seatsPerRow must be positive".to_string()));
    }

    let hall = sqlx::query_as::<_, Hall>(
        "INSERT INTO halls (name, total_rows, seats_per_row, capacity)
         VALUES (?, ?, ?, ?)
         RETURNING *",
    )
    .bind(&req.name)
    .bind(req.total_rows)
    .bind(req.seats_per_row)
    .bind(req.total_rows * req.seats_per_row)
    .fetch_one(&state.db.pool)
    .await?;

    tracing::info!(hall_id = hall.id, name = %hall.name, "hall created");
    Ok((StatusCode::CREATED, Json(hall)))
}

// GET /api/halls
async fn get_all_halls(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let halls = sqlx::query_as::<_, Hall>("SELECT * FROM halls ORDER BY id")
        .fetch_all(&state.db.pool)
        .await?;
    Ok(Json(halls))
}

// GET /api/halls/{id}
async fn get_hall_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let hall = sqlx::query_as::<_, Hall>("SELECT * FROM halls WHERE id = ?")
        .bind(id)
        .fetch_optional(&state.db.pool)
        .await?
        .ok_or(ApiError::NotFound("Hall"))?;
    Ok(Json(hall))
}

// DELETE /api/halls/{id}
//
// Cascades to the hall's showtimes and their tickets.
async fn delete_hall(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let result = sqlx::query("DELETE FROM halls WHERE id = ?")
        .bind(id)
        .execute(&state.db.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Hall"));
    }
    Ok(Json(json!({ "message": "Hall removed" })))
}
