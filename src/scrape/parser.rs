use super::types::{BookingLink, DayPage, ParseError, RoomHeader};
use chrono::{NaiveDate, NaiveDateTime};
use scraper::{ElementRef, Html, Selector};

/// Every capacity label on the grid starts with this literal.
const CAPACITY_PREFIX: &str = "Capacity: ";

/// Parse one day's booking grid into room headers and booked slots.
///
/// The grid's body mixes link cells (one booked half-hour slot each) with
/// spanning placeholder cells, so rows are kept separate; identity
/// resolution needs per-row link counts.
pub fn parse_page(html: &str) -> Result<DayPage, ParseError> {
    let document = Html::parse_document(html);

    let header_selector = Selector::parse("#day_main th").unwrap();
    let row_selector = Selector::parse("#day_main tbody tr").unwrap();
    let link_selector = Selector::parse(".new_booking").unwrap();
    let label_selector = Selector::parse("span").unwrap();

    let cells: Vec<ElementRef> = document.select(&header_selector).collect();
    // The first and last header cells are the time-label column and a
    // trailing spacer, not rooms.
    if cells.len() < 2 {
        return Err(ParseError::MissingHeader);
    }
    let headers = cells[1..cells.len() - 1]
        .iter()
        .map(|cell| parse_header_cell(*cell, &label_selector))
        .collect::<Result<Vec<_>, _>>()?;

    let rows = document
        .select(&row_selector)
        .map(|row| {
            row.select(&link_selector)
                .map(parse_booking_link)
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DayPage { headers, rows })
}

fn parse_header_cell(cell: ElementRef, labels: &Selector) -> Result<RoomHeader, ParseError> {
    let mut spans = cell.select(labels);

    // First span is the room name, second is the capacity label
    let name = spans
        .next()
        .ok_or(ParseError::MissingRoomName)?
        .text()
        .collect::<String>()
        .trim()
        .to_string();

    let capacity_text = spans
        .next()
        .ok_or(ParseError::MissingCapacity)?
        .text()
        .collect::<String>();
    let capacity = capacity_text
        .trim()
        .strip_prefix(CAPACITY_PREFIX)
        .and_then(|n| n.trim().parse::<i32>().ok())
        .ok_or_else(|| ParseError::InvalidCapacity(capacity_text.trim().to_string()))?;

    Ok(RoomHeader { name, capacity })
}

fn parse_booking_link(cell: ElementRef) -> Result<BookingLink, ParseError> {
    let href = cell.value().attr("href").ok_or(ParseError::MissingHref)?;
    let query = href.split_once('?').map(|(_, q)| q).unwrap_or("");
    let params: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
        .into_owned()
        .collect();

    let room_id = query_int(&params, "room")?;
    let year = query_int(&params, "year")?;
    let month = query_int(&params, "month")?;
    let day = query_int(&params, "day")?;
    let hour = query_int(&params, "hour")?;
    let minute = query_int(&params, "minute")?;

    let time =
        link_time(year, month, day, hour, minute).ok_or(ParseError::InvalidTimestamp)?;

    Ok(BookingLink { room_id, time })
}

fn query_int(params: &[(String, String)], name: &'static str) -> Result<i64, ParseError> {
    let value = params
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
        .ok_or(ParseError::MissingParam(name))?;

    value.parse::<i64>().map_err(|_| ParseError::InvalidParam {
        param: name,
        value: value.to_string(),
    })
}

fn link_time(year: i64, month: i64, day: i64, hour: i64, minute: i64) -> Option<NaiveDateTime> {
    let date = NaiveDate::from_ymd_opt(
        i32::try_from(year).ok()?,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    )?;
    date.and_hms_opt(u32::try_from(hour).ok()?, u32::try_from(minute).ok()?, 0)
}
