use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The durable unit of output: one study room with its condensed booking
/// blocks for the week. This is exactly the shape the read API serves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Room {
    /// Stable identifier recovered from the booking grid, upsert key.
    pub id: i64,
    pub name: String,
    pub capacity: i32,
    #[sqlx(json)]
    pub bookings: Vec<Block>,
}

/// A maximal contiguous interval of booked half-hour slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub start: NaiveDateTime,
    /// Minutes, always a multiple of 30.
    pub duration: i64,
}
