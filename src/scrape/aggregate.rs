use super::condense::condense;
use super::types::DayPage;
use crate::models::Room;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

/// Accumulates per-room booked slots across every (date, area) page of one
/// scrape run. Owned by the run loop and fed one resolved page at a time;
/// consumed wholesale by `into_rooms` when the run is complete.
#[derive(Debug, Default)]
pub struct RoomSet {
    rooms: BTreeMap<i64, TrackedRoom>,
}

#[derive(Debug)]
struct TrackedRoom {
    name: String,
    capacity: i32,
    slots: Vec<NaiveDateTime>,
}

impl RoomSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one resolved page in. `room_ids[i]` identifies
    /// `page.headers[i]`. Name and capacity stick from the first sighting
    /// across the run; later pages only contribute slots.
    ///
    /// Bookings are attributed by the room id embedded in each link, never
    /// by column position. A link whose id matches no tracked room is
    /// dropped with a warning.
    pub fn absorb_page(&mut self, page: &DayPage, room_ids: &[i64]) {
        for (id, room_header) in room_ids.iter().zip(&page.headers) {
            self.rooms.entry(*id).or_insert_with(|| TrackedRoom {
                name: room_header.name.clone(),
                capacity: room_header.capacity,
                slots: Vec::new(),
            });
        }

        for link in page.booking_links() {
            match self.rooms.get_mut(&link.room_id) {
                Some(room) => room.slots.push(link.time),
                None => {
                    tracing::warn!(
                        "Booking link references unknown room {}, dropping",
                        link.room_id
                    );
                }
            }
        }
    }

    /// Sort each room's slots, condense them into blocks, and emit the
    /// durable rooms in id order.
    ///
    /// Pages arrive farthest-future day first, so the accumulated slot
    /// lists are not chronological; the condenser is only defined over an
    /// ascending list, hence the explicit sort. Rooms that never collected
    /// a slot are omitted here so the condenser never sees an empty list.
    pub fn into_rooms(self) -> Vec<Room> {
        self.rooms
            .into_iter()
            .filter_map(|(id, mut room)| {
                if room.slots.is_empty() {
                    tracing::debug!("Room {} has no bookings this run, omitting", id);
                    return None;
                }

                room.slots.sort_unstable();
                Some(Room {
                    id,
                    name: room.name,
                    capacity: room.capacity,
                    bookings: condense(&room.slots),
                })
            })
            .collect()
    }
}
