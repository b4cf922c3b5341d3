use std::sync::Arc;

use tracing::{info, warn};

use super::placement::{place_students, seat_records};
use super::roster::{build_roster, roll_numbers, validate_ranges};
use super::types::{BranchRange, RoomLookup, SeatRecord, SeatingPlan};
use crate::error::{Result, SeatingError};
use crate::store::{RecordStore, RoomDirectory};

/// Allocation and lookup over a room directory and a record store
#[derive(Clone)]
pub struct SeatingService {
    rooms: Arc<dyn RoomDirectory>,
    records: Arc<dyn RecordStore>,
}

impl SeatingService {
    pub fn new(rooms: Arc<dyn RoomDirectory>, records: Arc<dyn RecordStore>) -> Self {
        SeatingService { rooms, records }
    }

    pub fn rooms(&self) -> &Arc<dyn RoomDirectory> {
        &self.rooms
    }

    /// Seats the students of `ranges` in `room_name` and persists the result.
    ///
    /// Previous records of the room are replaced. Students that cannot be
    /// placed are listed in [`SeatingPlan::unseated`]; nothing is stored when
    /// the room is unknown or the ranges are malformed.
    pub fn allocate_seating(&self, room_name: &str, ranges: &[BranchRange]) -> Result<SeatingPlan> {
        let room = self
            .rooms
            .find_room(room_name)?
            .ok_or_else(|| SeatingError::RoomNotFound(room_name.to_string()))?;
        // Directories other than the registry may hand out unchecked rooms
        room.validate()?;

        let roster = build_roster(ranges)?;
        let placement = place_students(room.capacity, &roster);

        if !placement.unseated.is_empty() {
            warn!(
                room = %room.name,
                capacity = room.capacity,
                students = roster.len(),
                unseated = placement.unseated.len(),
                "Some students could not be seated"
            );
        }

        let batch = self
            .records
            .replace_room(&room.name, seat_records(&room.name, &placement.seating))?;

        info!(
            room = %room.name,
            batch = batch.id,
            seated = batch.records.len(),
            unseated = placement.unseated.len(),
            "Seating arrangement generated"
        );

        Ok(SeatingPlan {
            room: room.name,
            seating: placement.seating,
            unseated: placement.unseated,
            records: batch.records,
        })
    }

    /// Room and seat for a roll number
    pub fn lookup_room(&self, roll_number: u32) -> Result<RoomLookup> {
        self.records
            .find_by_roll(roll_number)?
            .map(|record| RoomLookup {
                room_assigned: record.room_assigned,
                seat_number: record.seat_number,
            })
            .ok_or(SeatingError::RollNotFound(roll_number))
    }

    /// Roll numbers in `ranges` that already hold a seat, ascending
    pub fn check_rolls(&self, ranges: &[BranchRange]) -> Result<Vec<u32>> {
        validate_ranges(ranges)?;

        let mut duplicates = Vec::new();
        for roll in roll_numbers(ranges) {
            if self.records.find_by_roll(roll)?.is_some() {
                duplicates.push(roll);
            }
        }
        duplicates.sort_unstable();
        Ok(duplicates)
    }

    /// Current records of a room in seat order
    pub fn room_seating(&self, room_name: &str) -> Result<Vec<SeatRecord>> {
        let room = self
            .rooms
            .find_room(room_name)?
            .ok_or_else(|| SeatingError::RoomNotFound(room_name.to_string()))?;
        self.records.records_for_room(&room.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seating::{Room, MAX_CAPACITY, MAX_ROSTER};
    use crate::store::{MemoryStore, RoomRegistry};

    /// Directory that returns whatever room it holds, unchecked
    struct FixedRoom(Room);

    impl RoomDirectory for FixedRoom {
        fn find_room(&self, name: &str) -> Result<Option<Room>> {
            Ok(Some(self.0.clone()).filter(|room| room.name == name))
        }

        fn rooms(&self) -> Result<Vec<Room>> {
            Ok(vec![self.0.clone()])
        }

        fn upsert_room(&self, _room: Room) -> Result<()> {
            Ok(())
        }
    }

    fn service() -> SeatingService {
        let rooms = RoomRegistry::with_rooms([
            Room::new("A-101", 5).with_branches(["A", "B"]),
            Room::new("B-201", 30),
            Room::new("Empty", 0),
        ])
        .unwrap();
        SeatingService::new(Arc::new(rooms), Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_allocate_worked_example() {
        let service = service();
        let plan = service
            .allocate_seating(
                "A-101",
                &[BranchRange::new("B", 103, 103), BranchRange::new("A", 101, 102)],
            )
            .unwrap();

        let rolls: Vec<Option<u32>> = plan
            .seating
            .iter()
            .map(|slot| slot.as_ref().map(|s| s.roll_number))
            .collect();
        assert_eq!(rolls, vec![Some(101), Some(103), Some(102), None, None]);
        assert_eq!(plan.records.len(), 3);
        assert_eq!(plan.seated_count(), 3);
    }

    #[test]
    fn test_unknown_room() {
        let err = service()
            .allocate_seating("Nowhere", &[BranchRange::new("A", 1, 2)])
            .unwrap_err();
        assert_eq!(err, SeatingError::RoomNotFound("Nowhere".into()));
    }

    #[test]
    fn test_lookup_round_trip() {
        let service = service();
        let plan = service
            .allocate_seating("B-201", &[BranchRange::new("CSE", 1, 10), BranchRange::new("IT", 11, 20)])
            .unwrap();

        for record in &plan.records {
            let found = service.lookup_room(record.roll_number).unwrap();
            assert_eq!(found.room_assigned, "B-201");
            assert_eq!(found.seat_number, record.seat_number);
        }
        assert_eq!(service.lookup_room(999).unwrap_err(), SeatingError::RollNotFound(999));
    }

    #[test]
    fn test_zero_capacity_room() {
        let plan = service()
            .allocate_seating("Empty", &[BranchRange::new("A", 1, 3)])
            .unwrap();
        assert!(plan.seating.is_empty());
        assert_eq!(plan.unseated, vec![1, 2, 3]);
        assert!(plan.records.is_empty());
    }

    #[test]
    fn test_invalid_ranges_store_nothing() {
        let service = service();
        let err = service
            .allocate_seating("B-201", &[BranchRange::new("A", 1, 5), BranchRange::new("B", 9, 2)])
            .unwrap_err();
        assert!(err.is_invalid_input());
        assert!(service.lookup_room(1).is_err());
    }

    #[test]
    fn test_oversized_room_refused() {
        let service = SeatingService::new(
            Arc::new(FixedRoom(Room::new("Big", usize::MAX))),
            Arc::new(MemoryStore::new()),
        );
        let err = service.allocate_seating("Big", &[]).unwrap_err();
        assert!(matches!(err, SeatingError::InvalidRoom(_)));

        let service = SeatingService::new(
            Arc::new(FixedRoom(Room::new("Hall", MAX_CAPACITY))),
            Arc::new(MemoryStore::new()),
        );
        assert_eq!(service.allocate_seating("Hall", &[]).unwrap().seating.len(), MAX_CAPACITY);
    }

    #[test]
    fn test_huge_ranges_refused_before_expanding() {
        let service = service();
        let huge = [BranchRange::new("CSE", 0, u32::MAX)];

        let err = service.allocate_seating("A-101", &huge).unwrap_err();
        assert!(matches!(err, SeatingError::TooManyStudents { limit: MAX_ROSTER, .. }));
        assert!(err.is_invalid_input());
        assert!(service.check_rolls(&huge).unwrap_err().is_invalid_input());
        assert!(service.room_seating("A-101").unwrap().is_empty());
    }

    #[test]
    fn test_check_rolls_reports_seated() {
        let service = service();
        service
            .allocate_seating("B-201", &[BranchRange::new("CSE", 10, 12)])
            .unwrap();

        let duplicates = service
            .check_rolls(&[BranchRange::new("CSE", 11, 15)])
            .unwrap();
        assert_eq!(duplicates, vec![11, 12]);
        assert!(service.check_rolls(&[BranchRange::new("IT", 50, 60)]).unwrap().is_empty());
    }

    #[test]
    fn test_room_seating_follows_reallocation() {
        let service = service();
        service.allocate_seating("B-201", &[BranchRange::new("A", 1, 4)]).unwrap();
        service.allocate_seating("B-201", &[BranchRange::new("B", 7, 8)]).unwrap();

        let rolls: Vec<u32> = service
            .room_seating("B-201")
            .unwrap()
            .iter()
            .map(|r| r.roll_number)
            .collect();
        assert_eq!(rolls, vec![7, 8]);
        assert!(service.room_seating("Nowhere").unwrap_err().is_not_found());
    }
}
