use std::collections::HashMap;

use super::types::{SeatRecord, SeatSlot, StudentCandidate};

/// Output of one placement pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub seating: Vec<SeatSlot>,
    pub unseated: Vec<u32>,
}

/// Greedy adjacency-avoiding placement.
///
/// Students are taken in roster order and each gets the lowest free seat that
/// is more than one position away from the seat most recently given to the
/// same branch. Only that single last seat is checked, so two students of one
/// branch can still end up side by side when a later student of the branch
/// lands next to an earlier one. Students with no eligible seat are reported
/// in `unseated`; once the room is full the rest of the roster goes there
/// without scanning.
pub fn place_students(capacity: usize, roster: &[StudentCandidate]) -> Placement {
    let mut seating: Vec<SeatSlot> = vec![None; capacity];
    let mut last_seat_of_branch: HashMap<&str, usize> = HashMap::new();
    let mut unseated = Vec::new();
    let mut free = capacity;

    for (position, student) in roster.iter().enumerate() {
        if free == 0 {
            unseated.extend(roster[position..].iter().map(|s| s.roll_number));
            break;
        }

        let last = last_seat_of_branch.get(student.branch.as_str()).copied();
        let seat = (0..capacity).find(|&seat| {
            seating[seat].is_none() && last.map_or(true, |last| last.abs_diff(seat) > 1)
        });

        match seat {
            Some(seat) => {
                seating[seat] = Some(student.clone());
                last_seat_of_branch.insert(student.branch.as_str(), seat);
                free -= 1;
            }
            None => unseated.push(student.roll_number),
        }
    }

    Placement { seating, unseated }
}

/// Builds one record per occupied seat, in seat order
pub fn seat_records(room: &str, seating: &[SeatSlot]) -> Vec<SeatRecord> {
    seating
        .iter()
        .enumerate()
        .filter_map(|(index, slot)| {
            slot.as_ref().map(|student| SeatRecord {
                roll_number: student.roll_number,
                branch: student.branch.clone(),
                room_assigned: room.to_string(),
                seat_number: index + 1,
                batch: 0,
            })
        })
        .collect()
}
