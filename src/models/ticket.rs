use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: i64,
    pub showtime_id: i64,
    pub seat_label: String,
    pub customer_name: String,
    pub user_id: Option<i64>,
    // Price paid at booking time, snapshotted from the request
    pub price: i64,
    pub status: String,
    pub created_at: NaiveDateTime,
}
