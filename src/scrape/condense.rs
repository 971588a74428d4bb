use crate::models::Block;
use chrono::{Duration, NaiveDateTime};

/// Grid slots are a fixed half hour.
pub const SLOT_MINUTES: i64 = 30;

/// Collapse an ascending list of booked half-hour slots into maximal
/// contiguous blocks.
///
/// Callers must not pass an empty list; rooms with no bookings are filtered
/// out before condensation (`RoomSet::into_rooms`).
pub fn condense(slots: &[NaiveDateTime]) -> Vec<Block> {
    let mut blocks = Vec::new();
    let Some((&first, rest)) = slots.split_first() else {
        return blocks;
    };

    let mut start = first;
    let mut run_len: i64 = 1;

    for &slot in rest {
        if slot == start + Duration::minutes(SLOT_MINUTES * run_len) {
            // Exactly the next consecutive half-hour slot
            run_len += 1;
        } else {
            blocks.push(Block {
                start,
                duration: run_len * SLOT_MINUTES,
            });
            start = slot;
            run_len = 1;
        }
    }

    blocks.push(Block {
        start,
        duration: run_len * SLOT_MINUTES,
    });
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn slot(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 10)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_gap_splits_blocks() {
        let blocks = condense(&[slot(10, 0), slot(10, 30), slot(11, 0), slot(12, 0)]);

        assert_eq!(
            blocks,
            vec![
                Block {
                    start: slot(10, 0),
                    duration: 90,
                },
                Block {
                    start: slot(12, 0),
                    duration: 30,
                },
            ]
        );
    }

    #[test]
    fn test_single_slot_yields_one_half_hour_block() {
        let blocks = condense(&[slot(9, 0)]);

        assert_eq!(
            blocks,
            vec![Block {
                start: slot(9, 0),
                duration: 30,
            }]
        );
    }

    #[test]
    fn test_contiguous_run_yields_one_block() {
        let slots: Vec<NaiveDateTime> = (0..16)
            .map(|i| slot(8, 0) + Duration::minutes(30 * i))
            .collect();

        let blocks = condense(&slots);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].start, slot(8, 0));
        assert_eq!(blocks[0].duration, 16 * 30);
    }

    #[test]
    fn test_blocks_are_disjoint_maximal_and_ordered() {
        let slots = [
            slot(9, 0),
            slot(9, 30),
            slot(11, 0),
            slot(11, 30),
            slot(12, 0),
            slot(15, 0),
        ];

        let blocks = condense(&slots);

        assert_eq!(blocks.len(), 3);
        // Every block starts after the previous one ends, with a real gap
        for pair in blocks.windows(2) {
            let end = pair[0].start + Duration::minutes(pair[0].duration);
            assert!(pair[1].start > end);
        }
        // Durations cover exactly the input slots
        let covered: i64 = blocks.iter().map(|b| b.duration).sum();
        assert_eq!(covered, slots.len() as i64 * 30);
    }

    #[test]
    fn test_day_boundary_is_contiguous_when_slots_are() {
        // 23:30 into 00:00 next day is still one run
        let late = NaiveDate::from_ymd_opt(2026, 8, 10)
            .unwrap()
            .and_hms_opt(23, 30, 0)
            .unwrap();
        let midnight = NaiveDate::from_ymd_opt(2026, 8, 11)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        let blocks = condense(&[late, midnight]);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].duration, 60);
    }
}
