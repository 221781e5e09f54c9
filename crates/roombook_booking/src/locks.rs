// --- File: crates/roombook_booking/src/locks.rs ---
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// One async mutex per room.
///
/// Held across the conflict check and the write that follows it, so two
/// requests for the same room are evaluated one after the other. Requests
/// for different rooms never wait on each other.
#[derive(Debug, Default)]
pub struct RoomLocks {
    rooms: DashMap<String, Arc<Mutex<()>>>,
}

impl RoomLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `room_id`. Released when the guard drops.
    pub async fn lock(&self, room_id: &str) -> OwnedMutexGuard<()> {
        // The map shard must not stay locked while awaiting the room mutex.
        let mutex = self
            .rooms
            .entry(room_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        mutex.lock_owned().await
    }
}
