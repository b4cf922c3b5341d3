//! Error types for seating allocation and lookup.

use thiserror::Error;

/// Errors returned by the seating engine and its stores.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SeatingError {
    /// The referenced room is not in the room directory.
    #[error("room not found: {0}")]
    RoomNotFound(String),

    /// No seat has been recorded for this roll number.
    #[error("roll number {0} not found in any seating arrangement")]
    RollNotFound(u32),

    /// A branch range whose start is after its end.
    #[error("start roll {start} for {branch} must be less than or equal to end roll {end}")]
    InvertedRange { branch: String, start: u32, end: u32 },

    /// The same roll number was requested more than once.
    #[error("roll number {roll} appears in more than one range")]
    DuplicateRoll { roll: u32 },

    #[error("branch label must not be empty")]
    EmptyBranch,

    /// The ranges cover more students than one allocation accepts.
    #[error("ranges cover {count} students, at most {limit} are accepted")]
    TooManyStudents { count: u64, limit: u64 },

    /// A room definition that cannot be stored.
    #[error("invalid room: {0}")]
    InvalidRoom(String),

    /// Store I/O or serialization failure.
    #[error("storage error: {0}")]
    Storage(String),
}

impl SeatingError {
    /// True for the "nothing there" class: unknown room or roll number.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SeatingError::RoomNotFound(_) | SeatingError::RollNotFound(_))
    }

    /// True for errors caused by malformed caller input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            SeatingError::InvertedRange { .. }
                | SeatingError::DuplicateRoll { .. }
                | SeatingError::EmptyBranch
                | SeatingError::TooManyStudents { .. }
                | SeatingError::InvalidRoom(_)
        )
    }
}

impl From<std::io::Error> for SeatingError {
    fn from(err: std::io::Error) -> Self {
        SeatingError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for SeatingError {
    fn from(err: serde_json::Error) -> Self {
        SeatingError::Storage(err.to_string())
    }
}

impl From<csv::Error> for SeatingError {
    fn from(err: csv::Error) -> Self {
        SeatingError::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SeatingError>;
