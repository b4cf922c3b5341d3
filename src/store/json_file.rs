use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::info;

use super::memory::{lock_table, RecordTable};
use super::RecordStore;
use crate::error::Result;
use crate::seating::{AllocationBatch, SeatRecord};

/// Record store persisted as a single JSON document.
///
/// The whole table is rewritten after each batch through a temporary file and
/// a rename, so a crash mid-write leaves the previous document in place.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    table: Mutex<RecordTable>,
}

impl JsonFileStore {
    /// Opens the store, starting empty if the file does not exist yet
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let table = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            if contents.trim().is_empty() {
                RecordTable::default()
            } else {
                serde_json::from_str(&contents)?
            }
        } else {
            RecordTable::default()
        };

        info!(
            path = %path.display(),
            records = table.records.len(),
            "Opened seat record file"
        );

        Ok(JsonFileStore {
            path,
            table: Mutex::new(table),
        })
    }

    fn save(&self, table: &RecordTable) -> Result<()> {
        let json = serde_json::to_string_pretty(table)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl RecordStore for JsonFileStore {
    fn replace_room(&self, room: &str, records: Vec<SeatRecord>) -> Result<AllocationBatch> {
        let mut table = lock_table(&self.table)?;
        // Work on a copy so a failed write leaves memory and disk in agreement
        let mut updated = table.clone();
        let batch = updated.replace_room(room, records);
        self.save(&updated)?;
        *table = updated;
        Ok(batch)
    }

    fn find_by_roll(&self, roll_number: u32) -> Result<Option<SeatRecord>> {
        Ok(lock_table(&self.table)?.find_by_roll(roll_number))
    }

    fn records_for_room(&self, room: &str) -> Result<Vec<SeatRecord>> {
        Ok(lock_table(&self.table)?.records_for_room(room))
    }
}
