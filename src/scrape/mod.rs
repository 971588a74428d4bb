pub mod aggregate;
pub mod client;
pub mod condense;
pub mod parser;
pub mod resolve;
pub mod types;

pub use aggregate::RoomSet;
pub use client::BookingClient;

use crate::models::Room;
use chrono::{Days, NaiveDate};
use types::ScrapeError;

/// How many calendar days a run covers, today included.
pub const DAYS_AHEAD: u64 = 7;

/// One full scrape run: every (date, area) pair for the next week,
/// farthest-future day first (those pages are the most heavily booked and
/// therefore the likeliest to contain a row that resolves every room's
/// identity). A failed pair is logged and skipped; the rest of the run
/// carries on. Nothing is persisted here — the caller gets the condensed
/// batch and writes it in one piece.
pub async fn run(client: &BookingClient, areas: &[u32], today: NaiveDate) -> Vec<Room> {
    let mut rooms = RoomSet::new();

    for offset in (0..DAYS_AHEAD).rev() {
        let date = today + Days::new(offset);
        for &area in areas {
            match scrape_pair(client, date, area, &mut rooms).await {
                Ok(links) => {
                    tracing::info!("Scraped {} booking links for {} area {}", links, date, area);
                }
                Err(e) => {
                    tracing::warn!("Skipping {} area {}: {}", date, area, e);
                }
            }
        }
    }

    rooms.into_rooms()
}

async fn scrape_pair(
    client: &BookingClient,
    date: NaiveDate,
    area: u32,
    rooms: &mut RoomSet,
) -> Result<usize, ScrapeError> {
    let html = client.fetch_day(date, area).await?;
    let page = parser::parse_page(&html)?;
    let room_ids = resolve::resolve_room_ids(&page)?;

    let links = page.booking_links().count();
    rooms.absorb_page(&page, &room_ids);
    Ok(links)
}
