use super::types::{DayPage, ScrapeError};

/// Recover the stable room id for each header column.
///
/// Column spans mean a header's position usually does not line up with any
/// particular cell, so the only trustworthy mapping comes from a
/// fully-booked row: one link cell per room, left to right. The first such
/// row in document order wins. Rows with fewer link cells than headers have
/// spanning gaps and never contribute a mapping.
///
/// If the site ever reordered rows between requests this could attribute
/// identities to the wrong columns; the source behavior has no correction
/// policy for that and neither does this.
pub fn resolve_room_ids(page: &DayPage) -> Result<Vec<i64>, ScrapeError> {
    if page.headers.is_empty() {
        return Err(ScrapeError::IdentityResolution);
    }

    page.rows
        .iter()
        .find(|row| row.len() == page.headers.len())
        .map(|row| row.iter().map(|link| link.room_id).collect())
        .ok_or(ScrapeError::IdentityResolution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::types::{BookingLink, RoomHeader};
    use chrono::NaiveDate;

    fn header(name: &str) -> RoomHeader {
        RoomHeader {
            name: name.to_string(),
            capacity: 4,
        }
    }

    fn link(room_id: i64, hour: u32) -> BookingLink {
        BookingLink {
            room_id,
            time: NaiveDate::from_ymd_opt(2026, 8, 10)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_resolution_maps_first_full_row_left_to_right() {
        let page = DayPage {
            headers: vec![header("A"), header("B"), header("C")],
            rows: vec![
                vec![link(20, 9)],
                vec![link(10, 10), link(30, 10)],
                vec![link(10, 11), link(20, 11), link(30, 11)],
                vec![link(30, 12), link(10, 12), link(20, 12)],
            ],
        };

        // Earlier partial rows are ignored; the later full row never gets a say
        assert_eq!(resolve_room_ids(&page).unwrap(), vec![10, 20, 30]);
    }

    #[test]
    fn test_no_full_row_is_a_resolution_failure() {
        let page = DayPage {
            headers: vec![header("A"), header("B"), header("C")],
            rows: vec![vec![link(10, 9), link(20, 9)], vec![link(30, 10)]],
        };

        let err = resolve_room_ids(&page).unwrap_err();
        assert!(matches!(err, ScrapeError::IdentityResolution));
    }

    #[test]
    fn test_short_rows_are_never_truncated_into_a_mapping() {
        // Two link cells against three headers must fail, not map the
        // first two columns
        let page = DayPage {
            headers: vec![header("A"), header("B"), header("C")],
            rows: vec![vec![link(10, 9), link(20, 9)]],
        };

        assert!(resolve_room_ids(&page).is_err());
    }

    #[test]
    fn test_page_without_rows_fails() {
        let page = DayPage {
            headers: vec![header("A")],
            rows: vec![],
        };

        assert!(resolve_room_ids(&page).is_err());
    }

    #[test]
    fn test_page_without_headers_fails() {
        let page = DayPage {
            headers: vec![],
            rows: vec![vec![]],
        };

        assert!(resolve_room_ids(&page).is_err());
    }
}
