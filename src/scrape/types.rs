use chrono::NaiveDateTime;

/// One room column from the grid header: display name and seating capacity.
/// The header carries no stable identifier, that comes later from a
/// fully-booked row (see `resolve`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomHeader {
    pub name: String,
    pub capacity: i32,
}

/// One booked half-hour slot, decoded from a booking link's query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingLink {
    pub room_id: i64,
    pub time: NaiveDateTime,
}

/// Parse result for one (date, area) page.
#[derive(Debug, Clone, Default)]
pub struct DayPage {
    pub headers: Vec<RoomHeader>,
    /// Booking-link cells per body row, in document order. Spanning
    /// placeholder cells carry no link and are not represented.
    pub rows: Vec<Vec<BookingLink>>,
}

impl DayPage {
    /// All booking links on the page, in row order.
    pub fn booking_links(&self) -> impl Iterator<Item = &BookingLink> {
        self.rows.iter().flatten()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("page has no booking grid header")]
    MissingHeader,

    #[error("header cell has no room name label")]
    MissingRoomName,

    #[error("header cell has no capacity label")]
    MissingCapacity,

    #[error("capacity label not in expected format: {0:?}")]
    InvalidCapacity(String),

    #[error("booking link has no href")]
    MissingHref,

    #[error("booking link missing query parameter: {0}")]
    MissingParam(&'static str),

    #[error("booking link parameter {param} not an integer: {value:?}")]
    InvalidParam {
        param: &'static str,
        value: String,
    },

    #[error("booking link timestamp out of range")]
    InvalidTimestamp,
}

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("no fully-booked row to resolve room identities from")]
    IdentityResolution,
}
