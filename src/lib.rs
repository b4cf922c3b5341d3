//! Exam seat allocation.
//!
//! Students are given as per-branch roll-number ranges, merged into one
//! roster sorted by roll number, and placed greedily so that a student never
//! sits directly next to the seat last given to their own branch. Seat
//! records are stored per room and can be looked up by roll number.

pub mod cli;
pub mod display;
pub mod error;
pub mod parser;
pub mod seating;
pub mod store;
pub mod web;

pub use error::{Result, SeatingError};
pub use seating::{BranchRange, Room, RoomLookup, SeatRecord, SeatingPlan, SeatingService};
