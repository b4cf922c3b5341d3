use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::RecordStore;
use crate::error::{Result, SeatingError};
use crate::seating::{AllocationBatch, SeatRecord};

/// Records keyed by roll number plus the batch counter.
///
/// Shared by the in-memory and file-backed stores; the file store serializes
/// this struct as-is.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub(crate) struct RecordTable {
    pub(crate) last_batch: u64,
    pub(crate) records: BTreeMap<u32, SeatRecord>,
}

impl RecordTable {
    pub(crate) fn replace_room(&mut self, room: &str, records: Vec<SeatRecord>) -> AllocationBatch {
        let before = self.records.len();
        self.records.retain(|_, record| record.room_assigned != room);
        let retracted = before - self.records.len();

        self.last_batch += 1;
        let id = self.last_batch;

        let records: Vec<SeatRecord> = records
            .into_iter()
            .map(|mut record| {
                record.batch = id;
                record.room_assigned = room.to_string();
                record
            })
            .collect();

        for record in &records {
            if let Some(previous) = self.records.insert(record.roll_number, record.clone()) {
                warn!(
                    roll_number = record.roll_number,
                    from_room = %previous.room_assigned,
                    to_room = %room,
                    "Roll number moved to another room"
                );
            }
        }

        debug!(room, batch = id, retracted, stored = records.len(), "Replaced room records");

        AllocationBatch {
            id,
            room: room.to_string(),
            created_at: Utc::now(),
            records,
        }
    }

    pub(crate) fn find_by_roll(&self, roll_number: u32) -> Option<SeatRecord> {
        self.records.get(&roll_number).cloned()
    }

    pub(crate) fn records_for_room(&self, room: &str) -> Vec<SeatRecord> {
        let mut records: Vec<SeatRecord> = self
            .records
            .values()
            .filter(|record| record.room_assigned == room)
            .cloned()
            .collect();
        records.sort_by_key(|record| record.seat_number);
        records
    }
}

pub(crate) fn lock_table(table: &Mutex<RecordTable>) -> Result<MutexGuard<'_, RecordTable>> {
    table
        .lock()
        .map_err(|_| SeatingError::Storage("record store lock poisoned".to_string()))
}

/// Record store that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: Mutex<RecordTable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn replace_room(&self, room: &str, records: Vec<SeatRecord>) -> Result<AllocationBatch> {
        Ok(lock_table(&self.table)?.replace_room(room, records))
    }

    fn find_by_roll(&self, roll_number: u32) -> Result<Option<SeatRecord>> {
        Ok(lock_table(&self.table)?.find_by_roll(roll_number))
    }

    fn records_for_room(&self, room: &str) -> Result<Vec<SeatRecord>> {
        Ok(lock_table(&self.table)?.records_for_room(room))
    }
}
