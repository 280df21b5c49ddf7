use serde::Serialize;
use std::collections::HashMap;

/// Highest row a hall may have: row letters are single characters `A`..`Z`.
pub const MAX_ROWS: i64 = 26;

/// A seat position decoded from / encoded to a label like `B3`
/// (row letter + seat number). Seats are derived from hall geometry,
/// never stored as rows of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatLabel {
    pub row: i64,
    pub number: i64,
}

impl SeatLabel {
    /// Parses a label of the form `<A-Z><digits>`. Returns `None` for
    /// anything else, including lowercase letters and zero seat numbers.
    pub fn parse(label: &str) -> Option<SeatLabel> {
        let mut chars = label.chars();
        let letter = chars.next()?;
        if !letter.is_ascii_uppercase() {
            return None;
        }
        let rest = chars.as_str();
        if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let number: i64 = rest.parse().ok()?;
        if number < 1 {
            return None;
        }
        Some(SeatLabel {
            row: (letter as u8 - b'A') as i64 + 1,
            number,
        })
    }

    pub fn encode(&self) -> String {
        let letter = (b'A' + (self.row - 1) as u8) as char;
        format!("{}{}", letter, self.number)
    }

    pub fn in_bounds(&self, total_rows: i64, seats_per_row: i64) -> bool {
        self.row >= 1 && self.row <= total_rows && self.number >= 1 && self.number <= seats_per_row
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub label: String,
    pub status: String,
    pub booked_by: Option<String>,
    pub row: i64,
    pub number: i64,
}

/// Generates the full seat grid for a hall, row by row, marking each seat
/// booked when its label appears in the `booked` map (label -> customer name).
pub fn seat_grid(
    total_rows: i64,
    seats_per_row: i64,
    booked: &HashMap<String, String>,
) -> Vec<Seat> {
    let mut seats = Vec::with_capacity((total_rows * seats_per_row) as usize);
    for row in 1..=total_rows {
        for number in 1..=seats_per_row {
            let label = SeatLabel { row, number }.encode();
            let booked_by = booked.get(&label).cloned();
            seats.push(Seat {
                status: if booked_by.is_some() { "booked" } else { "available" }.to_string(),
                booked_by,
                label,
                row,
                number,
            });
        }
    }
    seats
}
