//! Room directory and seat-record persistence.
//!
//! The seating engine only talks to these traits. Two record stores are
//! provided: [`MemoryStore`] for tests and the HTTP server without a data
//! file, and [`JsonFileStore`] which rewrites a JSON document on every change.

mod json_file;
mod memory;
mod rooms;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use rooms::RoomRegistry;

use crate::error::Result;
use crate::seating::{AllocationBatch, Room, SeatRecord};

/// Source of rooms by name.
pub trait RoomDirectory: Send + Sync {
    fn find_room(&self, name: &str) -> Result<Option<Room>>;

    /// All rooms, sorted by name.
    fn rooms(&self) -> Result<Vec<Room>>;

    /// Adds a room or replaces the one with the same name.
    fn upsert_room(&self, room: Room) -> Result<()>;
}

/// Persisted seat records, keyed by roll number.
pub trait RecordStore: Send + Sync {
    /// Retracts every record of `room` and stores `records` as a new batch.
    ///
    /// A roll number already seated in another room is moved to `room`.
    fn replace_room(&self, room: &str, records: Vec<SeatRecord>) -> Result<AllocationBatch>;

    fn find_by_roll(&self, roll_number: u32) -> Result<Option<SeatRecord>>;

    /// Records of one room in seat order.
    fn records_for_room(&self, room: &str) -> Result<Vec<SeatRecord>>;
}
