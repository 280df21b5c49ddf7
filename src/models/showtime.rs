use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Showtime {
    pub id: i64,
    pub hall_id: i64,
    pub start_time: NaiveDateTime,
    pub price: i64,
    pub movie_id: Option<i64>,
    pub event_id: Option<i64>,
    pub is_event: bool,
}
