use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{seat, Seat, Showtime};
use crate::services::scheduling::{self, CreateShowtime};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/showtimes", post(create_showtime))
        .route("/showtimes", get(get_all_showtimes))
        .route("/showtimes/movie/{movie_id}", get(get_showtimes_by_movie))
        .route("/showtimes/event/{event_id}", get(get_showtimes_by_event))
        .route("/showtimes/{id}", delete(delete_showtime))
        .route("/seats/{showtime_id}", get(get_seats))
}

/* ---------- SHOWTIMES ---------- */

// POST /api/showtimes
async fn create_showtime(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateShowtime>,
) -> Result<impl IntoResponse, ApiError> {
    let showtime = scheduling::create_showtime(&state.db, &state.config.booking, req).await?;
    tracing::info!(
        showtime_id = showtime.id,
        hall_id = showtime.hall_id,
        start = %showtime.start_time,
        "showtime created"
    );
    Ok((StatusCode::CREATED, Json(showtime)))
}

// GET /api/showtimes
async fn get_all_showtimes(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let showtimes =
        sqlx::query_as::<_, Showtime>("SELECT * FROM showtimes ORDER BY start_time ASC")
            .fetch_all(&state.db.pool)
            .await?;
    Ok(Json(showtimes))
}

// GET /api/showtimes/movie/{movie_id}
async fn get_showtimes_by_movie(
    State(state): State<Arc<AppState>>,
    Path(movie_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let showtimes = sqlx::query_as::<_, Showtime>(
        "SELECT * FROM showtimes WHERE movie_id = ? ORDER BY start_time ASC",
    )
    .bind(movie_id)
    .fetch_all(&state.db.pool)
    .await?;
    Ok(Json(showtimes))
}

// GET /api/showtimes/event/{event_id}
async fn get_showtimes_by_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let showtimes = sqlx::query_as::<_, Showtime>(
        "SELECT * FROM showtimes WHERE event_id = ? ORDER BY start_time ASC",
    )
    .bind(event_id)
    .fetch_all(&state.db.pool)
    .await?;
    Ok(Json(showtimes))
}

// DELETE /api/showtimes/{id}
async fn delete_showtime(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    scheduling::delete_showtime(&state.db, id).await?;
    Ok(Json(json!({ "message": "Showtime removed" })))
}

/* ---------- SEATS ---------- */

#[derive(Debug, Serialize)]
struct SeatMapResponse {
    hall: String,
    seats: Vec<Seat>,
}

// GET /api/seats/{showtime_id}
//
// Optimistic read: runs outside any transaction, so a seat may show as
// available while a booking for it is in flight. The insert path is the
// authority.
async fn get_seats(
    State(state): State<Arc<AppState>>,
    Path(showtime_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let hall: Option<(String, i64, i64)> = sqlx::query_as(
        "SELECT h.name, h.total_rows, h.seats_per_row
         FROM showtimes s
         JOIN halls h ON h.id = s.hall_id
         WHERE s.id = ?",
    )
    .bind(showtime_id)
    .fetch_optional(&state.db.pool)
    .await?;

    let (hall_name, total_rows, seats_per_row) = hall.ok_or(ApiError::NotFound("Showtime"))?;

    let booked: HashMap<String, String> = sqlx::query_as::<_, (String, String)>(
        "SELECT seat_label, customer_name FROM tickets WHERE showtime_id = ?",
    )
    .bind(showtime_id)
    .fetch_all(&state.db.pool)
    .await?
    .into_iter()
    .collect();

    Ok(Json(SeatMapResponse {
        hall: hall_name,
        seats: seat::seat_grid(total_rows, seats_per_row, &booked),
    }))
}
