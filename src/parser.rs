use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use csv::{Reader, ReaderBuilder};
use tracing::{debug, warn};

use crate::error::{Result, SeatingError};
use crate::seating::{BranchRange, Room};

/// Splits a branch list such as "CSE; IT;ECE" into a set
fn parse_branches(value: &str) -> BTreeSet<String> {
    value
        .split([';', '|'])
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(str::to_string)
        .collect()
}

/// Loads rooms from a CSV file with `name`, `capacity` and optional `branches` columns
pub fn load_rooms<P: AsRef<Path>>(csv_path: P) -> Result<Vec<Room>> {
    let reader = Reader::from_path(csv_path)?;
    read_rooms(reader)
}

/// Reads rooms from any CSV source.
///
/// Columns are found by header name, case-insensitively. Rows without a name
/// are skipped; a capacity that is not a number fails the whole load.
pub fn read_rooms<R: Read>(mut reader: Reader<R>) -> Result<Vec<Room>> {
    let headers = reader.headers()?.clone();
    let column = |wanted: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(wanted))
    };

    let name_col = column("name").unwrap_or(0);
    let capacity_col = column("capacity").unwrap_or(1);
    let branches_col = column("branches").or_else(|| column("branches_allowed"));

    let mut rooms = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = result?;

        let name = record.get(name_col).unwrap_or("").trim().to_string();
        if name.is_empty() {
            warn!(line = line + 2, "Skipping room row without a name");
            continue;
        }

        let capacity_raw = record.get(capacity_col).unwrap_or("").trim();
        let capacity: usize = capacity_raw.parse().map_err(|_| {
            SeatingError::InvalidRoom(format!("capacity '{}' for room {} is not a number", capacity_raw, name))
        })?;

        let branches_allowed = branches_col
            .and_then(|col| record.get(col))
            .map(parse_branches)
            .unwrap_or_default();

        let room = Room {
            name,
            capacity,
            branches_allowed,
        };
        room.validate()?;
        rooms.push(room);
    }

    debug!(rooms = rooms.len(), "Loaded rooms");
    Ok(rooms)
}

/// Parses a command-line range of the form `BRANCH:START-END` (or `BRANCH:ROLL`)
pub fn parse_range_arg(value: &str) -> std::result::Result<BranchRange, String> {
    let (branch, rolls) = value
        .split_once(':')
        .ok_or_else(|| format!("expected BRANCH:START-END, got '{}'", value))?;

    let branch = branch.trim();
    if branch.is_empty() {
        return Err(format!("missing branch in '{}'", value));
    }

    let parse_roll = |s: &str| {
        s.trim()
            .parse::<u32>()
            .map_err(|_| format!("roll number '{}' must be numeric", s.trim()))
    };

    let (start, end) = match rolls.split_once('-') {
        Some((start, end)) => (parse_roll(start)?, parse_roll(end)?),
        None => {
            let roll = parse_roll(rolls)?;
            (roll, roll)
        }
    };

    Ok(BranchRange::new(branch, start, end))
}

/// Reads rooms from CSV text
pub fn rooms_from_str(csv: &str) -> Result<Vec<Room>> {
    read_rooms(ReaderBuilder::new().trim(csv::Trim::All).from_reader(csv.as_bytes()))
}
