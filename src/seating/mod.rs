pub mod types;
pub mod roster;
pub mod placement;
pub mod service;

pub use types::{
    AllocationBatch, BranchRange, Room, RoomLookup, SeatRecord, SeatSlot, SeatingPlan,
    StudentCandidate, MAX_CAPACITY, MAX_ROSTER,
};
pub use roster::{build_roster, validate_ranges};
pub use placement::{place_students, seat_records, Placement};
pub use service::SeatingService;
