use serde::Deserialize;

use crate::database::Database;
use crate::error::ApiError;
use crate::models::{SeatLabel, Ticket};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub showtime_id: i64,
    pub seat_label: String,
    pub customer_name: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub price: Option<i64>,
}

/// Books one seat for one customer. The check-then-insert runs inside an
/// immediate transaction so concurrent attempts on the same seat serialize;
/// the unique index on (showtime_id, seat_label) backstops any race that
/// slips past the check.
pub async fn create_booking(db: &Database, req: CreateBooking) -> Result<Ticket, ApiError> {
    if req.customer_name.trim().is_empty() {
        return Err(ApiError::Validation("customerName is required".to_string()));
    }

    // Resolve the showtime's hall geometry so out-of-range labels are
    // rejected before they reach the tickets table.
    let geometry: Option<(i64, i64)> = sqlx::query_as(
        "SELECT h.total_rows, h.seats_per_row
         FROM showtimes s
         JOIN halls h ON h.id = s.hall_id
         WHERE s.id = ?",
    )
    .bind(req.showtime_id)
    .fetch_optional(&db.pool)
    .await?;

    let (total_rows, seats_per_row) = geometry.ok_or(ApiError::NotFound("Showtime"))?;

    let seat = SeatLabel::parse(&req.seat_label)
        .filter(|s| s.in_bounds(total_rows, seats_per_row))
        .ok_or_else(|| ApiError::InvalidSeat(req.seat_label.clone()))?;
    let label = seat.encode();

    let mut tx = db.begin_immediate().await?;

    let existing: Option<i64> =
        sqlx::query_scalar("SELECT id FROM tickets WHERE showtime_id = ? AND seat_label = ?")
            .bind(req.showtime_id)
            .bind(&label)
            .fetch_optional(&mut *tx)
            .await?;

    if existing.is_some() {
        tx.rollback().await?;
        return Err(ApiError::SeatConflict);
    }

    let ticket = sqlx::query_as::<_, Ticket>(
        "INSERT INTO tickets (showtime_id, seat_label, customer_name, user_id, price, status)
         VALUES (?, ?, ?, ?, ?, 'booked')
         RETURNING *",
    )
    .bind(req.showtime_id)
    .bind(&label)
    .bind(&req.customer_name)
    .bind(req.user_id)
    .bind(req.price.unwrap_or(0))
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => ApiError::SeatConflict,
        other => ApiError::Database(other),
    })?;

    tx.commit().await?;
    Ok(ticket)
}

/// Hard-deletes the ticket, freeing its seat label immediately. No ownership
/// check: authorization is handled upstream of this service.
pub async fn cancel_booking(db: &Database, ticket_id: i64) -> Result<(), ApiError> {
    let result = sqlx::query("DELETE FROM tickets WHERE id = ?")
        .bind(ticket_id)
        .execute(&db.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Ticket"));
    }
    Ok(())
}
