use std::collections::BTreeMap;
use std::sync::RwLock;

use super::RoomDirectory;
use crate::error::{Result, SeatingError};
use crate::seating::Room;

/// In-memory room directory
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: RwLock<BTreeMap<String, Room>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from a list of rooms; later duplicates win
    pub fn with_rooms<I: IntoIterator<Item = Room>>(rooms: I) -> Result<Self> {
        let registry = Self::new();
        for room in rooms {
            registry.upsert_room(room)?;
        }
        Ok(registry)
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.rooms.read().map_err(|_| poisoned())?.len())
    }
}

fn poisoned() -> SeatingError {
    SeatingError::Storage("room directory lock poisoned".to_string())
}

impl RoomDirectory for RoomRegistry {
    fn find_room(&self, name: &str) -> Result<Option<Room>> {
        let rooms = self.rooms.read().map_err(|_| poisoned())?;
        Ok(rooms.get(name.trim()).cloned())
    }

    fn rooms(&self) -> Result<Vec<Room>> {
        let rooms = self.rooms.read().map_err(|_| poisoned())?;
        Ok(rooms.values().cloned().collect())
    }

    fn upsert_room(&self, mut room: Room) -> Result<()> {
        room.name = room.name.trim().to_string();
        room.validate()?;
        let mut rooms = self.rooms.write().map_err(|_| poisoned())?;
        rooms.insert(room.name.clone(), room);
        Ok(())
    }
}
