use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hall {
    pub id: i64,
    pub name: String,
    pub total_rows: i64,
    pub seats_per_row: i64,
    // Always total_rows * seats_per_row, computed on create
    pub capacity: i64,
}
