use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::Ticket;
use crate::services::booking::{self, CreateBooking};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bookings", post(create_booking))
        .route("/bookings/{id}", get(get_booking_by_id))
        .route("/bookings/{id}", delete(cancel_booking))
        .route("/users/{user_id}/bookings", get(get_user_bookings))
}

// POST /api/bookings
async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateBooking>,
) -> Result<impl IntoResponse, ApiError> {
    let ticket = booking::create_booking(&state.db, req).await?;
    tracing::info!(
        ticket_id = ticket.id,
        showtime_id = ticket.showtime_id,
        seat = %ticket.seat_label,
        "seat booked"
    );
    Ok((StatusCode::CREATED, Json(ticket)))
}

// GET /api/bookings/{id}
async fn get_booking_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let ticket = sqlx::query_as::<_, Ticket>("SELECT * FROM tickets WHERE id = ?")
        .bind(id)
        .fetch_optional(&state.db.pool)
        .await?
        .ok_or(ApiError::NotFound("Ticket"))?;

    Ok(Json(ticket))
}

// GET /api/users/{user_id}/bookings
async fn get_user_bookings(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let tickets = sqlx::query_as::<_, Ticket>(
        "SELECT * FROM tickets WHERE user_id = ? ORDER BY created_at DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(&state.db.pool)
    .await?;

    Ok(Json(tickets))
}

// DELETE /api/bookings/{id}
async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    booking::cancel_booking(&state.db, id).await?;
    tracing::info!(ticket_id = id, "booking cancelled");
    Ok(Json(json!({ "message": "Reservation cancelled" })))
}
