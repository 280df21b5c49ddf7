use chrono::{Duration, NaiveDateTime};
use serde::Deserialize;

use crate::config::BookingConfig;
use crate::database::Database;
use crate::error::ApiError;
use crate::models::Showtime;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShowtime {
    pub hall_id: i64,
    pub start_time: NaiveDateTime,
    pub price: i64,
    #[serde(default)]
    pub movie_id: Option<i64>,
    #[serde(default)]
    pub event_id: Option<i64>,
}

/// Half-open interval intersection over two screening windows of equal
/// length: touching boundaries (one ends exactly when the other starts)
/// do not conflict.
pub fn overlaps(new_start: NaiveDateTime, existing_start: NaiveDateTime, window: Duration) -> bool {
    let new_end = new_start + window;
    let existing_end = existing_start + window;
    new_start < existing_end && new_end > existing_start
}

/// Creates a showtime after checking the target hall for a time-window
/// collision. The check and insert share an immediate transaction, so two
/// concurrent creations for the same hall cannot both pass the check.
pub async fn create_showtime(
    db: &Database,
    cfg: &BookingConfig,
    req: CreateShowtime,
) -> Result<Showtime, ApiError> {
    if req.movie_id.is_none() && req.event_id.is_none() {
        return Err(ApiError::Validation(
            "Must provide either movieId or eventId".to_string(),
        ));
    }
    if req.movie_id.is_some() && req.event_id.is_some() {
        return Err(ApiError::Validation(
            "Provide only one of movieId or eventId".to_string(),
        ));
    }
    if req.price < 0 {
        return Err(ApiError::Validation("price must be non-negative".to_string()));
    }

    let window = Duration::hours(cfg.overlap_window_hours);

    let mut tx = db.begin_immediate().await?;

    let hall: Option<i64> = sqlx::query_scalar("SELECT id FROM halls WHERE id = ?")
        .bind(req.hall_id)
        .fetch_optional(&mut *tx)
        .await?;
    if hall.is_none() {
        tx.rollback().await?;
        return Err(ApiError::NotFound("Hall"));
    }

    // Superset fetch: any showtime starting within one window of the
    // proposed start could intersect it.
    let candidates: Vec<NaiveDateTime> = sqlx::query_scalar(
        "SELECT start_time FROM showtimes
         WHERE hall_id = ? AND start_time BETWEEN ? AND ?",
    )
    .bind(req.hall_id)
    .bind(req.start_time - window)
    .bind(req.start_time + window)
    .fetch_all(&mut *tx)
    .await?;

    if candidates
        .iter()
        .any(|existing| overlaps(req.start_time, *existing, window))
    {
        tx.rollback().await?;
        return Err(ApiError::SchedulingConflict);
    }

    let showtime = sqlx::query_as::<_, Showtime>(
        "INSERT INTO showtimes (hall_id, start_time, price, movie_id, event_id, is_event)
         VALUES (?, ?, ?, ?, ?, ?)
         RETURNING *",
    )
    .bind(req.hall_id)
    .bind(req.start_time)
    .bind(req.price)
    .bind(req.movie_id)
    .bind(req.event_id)
    .bind(req.event_id.is_some())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(showtime)
}

pub async fn delete_showtime(db: &Database, showtime_id: i64) -> Result<(), ApiError> {
    let result = sqlx::query("DELETE FROM showtimes WHERE id = ?")
        .bind(showtime_id)
        .execute(&db.pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ApiError::NotFound("Showtime"));
    }
    Ok(())
}
