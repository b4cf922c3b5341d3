use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SeatingError};

/// Largest room the allocator accepts
pub const MAX_CAPACITY: usize = 10_000;

/// Largest number of students in one set of ranges
pub const MAX_ROSTER: u64 = 100_000;

/// An examination room as provided by the room directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub capacity: usize,
    #[serde(default)]
    pub branches_allowed: BTreeSet<String>,
}

impl Room {
    pub fn new(name: impl Into<String>, capacity: usize) -> Self {
        Room {
            name: name.into(),
            capacity,
            branches_allowed: BTreeSet::new(),
        }
    }

    pub fn with_branches<I, S>(mut self, branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.branches_allowed = branches.into_iter().map(Into::into).collect();
        self
    }

    /// Rejects blank names and capacities above [`MAX_CAPACITY`]
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(SeatingError::InvalidRoom("room name is required".to_string()));
        }
        if self.capacity > MAX_CAPACITY {
            return Err(SeatingError::InvalidRoom(format!(
                "capacity {} for room {} exceeds the limit of {}",
                self.capacity, self.name, MAX_CAPACITY
            )));
        }
        Ok(())
    }
}

/// Inclusive range of roll numbers for one branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRange {
    pub branch: String,
    pub start_roll: u32,
    pub end_roll: u32,
}

impl BranchRange {
    pub fn new(branch: impl Into<String>, start_roll: u32, end_roll: u32) -> Self {
        BranchRange {
            branch: branch.into(),
            start_roll,
            end_roll,
        }
    }
}

/// A student waiting for a seat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentCandidate {
    pub roll_number: u32,
    pub branch: String,
}

/// One seat in a room; `None` when empty
pub type SeatSlot = Option<StudentCandidate>;

/// Durable record of one seated student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatRecord {
    pub roll_number: u32,
    pub branch: String,
    pub room_assigned: String,
    /// 1-based
    pub seat_number: usize,
    /// Allocation run that produced this record, 0 until stored
    #[serde(default)]
    pub batch: u64,
}

/// All records written by one allocation run of one room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationBatch {
    pub id: u64,
    pub room: String,
    pub created_at: DateTime<Utc>,
    pub records: Vec<SeatRecord>,
}

/// Result of allocating a room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeatingPlan {
    pub room: String,
    /// One entry per seat, length is always the room capacity
    pub seating: Vec<SeatSlot>,
    /// Roll numbers that could not be placed, in roster order
    pub unseated: Vec<u32>,
    pub records: Vec<SeatRecord>,
}

impl SeatingPlan {
    pub fn seated_count(&self) -> usize {
        self.seating.iter().filter(|slot| slot.is_some()).count()
    }
}

/// Where a roll number sits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomLookup {
    pub room_assigned: String,
    pub seat_number: usize,
}
