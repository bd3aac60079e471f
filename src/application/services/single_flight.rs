//! Per-key request coalescing.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type Slot = Arc<AsyncMutex<()>>;

/// Serializes work per key so concurrent misses for the same key issue a
/// single upstream call.
///
/// Callers hold the returned [`FlightGuard`] while fetching and storing, then
/// re-check the cache after acquiring: a waiter that acquires after the leader
/// finds the leader's result already cached.
#[derive(Default)]
pub struct SingleFlight {
    slots: Mutex<HashMap<String, Slot>>,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits until no other holder owns `key`, then claims it.
    ///
    /// Dropping the returned future while it waits releases the caller's
    /// interest in `key` just like dropping the guard.
    pub async fn acquire(&self, key: &str) -> FlightGuard<'_> {
        let slot = {
            let mut slots = self.slots.lock();
            SlotRef {
                owner: self,
                key: key.to_string(),
                slot: slots.entry(key.to_string()).or_default().clone(),
            }
        };

        let permit = slot.slot.clone().lock_owned().await;

        FlightGuard {
            _permit: permit,
            _slot: slot,
        }
    }

    /// Number of keys currently claimed or awaited.
    pub fn in_flight(&self) -> usize {
        self.slots.lock().len()
    }
}

/// One caller's reference to a key's slot. The last one out removes the slot.
struct SlotRef<'a> {
    owner: &'a SingleFlight,
    key: String,
    slot: Slot,
}

impl Drop for SlotRef<'_> {
    fn drop(&mut self) {
        let mut slots = self.owner.slots.lock();

        // Only the map and `self.slot` remain. New references are taken under
        // the map lock, which is held here.
        if Arc::strong_count(&self.slot) == 2
            && slots
                .get(&self.key)
                .is_some_and(|current| Arc::ptr_eq(current, &self.slot))
        {
            slots.remove(&self.key);
        }
    }
}

/// Claim on a key; released on drop.
pub struct FlightGuard<'a> {
    // Field order matters: the permit is released before the slot reference.
    _permit: OwnedMutexGuard<()>,
    _slot: SlotRef<'a>,
}
