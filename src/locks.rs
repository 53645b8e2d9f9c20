//! Per-promotion write serialisation.

use std::sync::{Arc, Mutex, PoisonError};

use rustc_hash::FxHashMap;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use crate::domain::promotions::records::PromotionUuid;

/// One async mutex per promotion id. Mutating operations hold the guard for
/// their whole read-modify-write, so at most one mutation per promotion is in
/// flight while different promotions proceed in parallel.
#[derive(Debug, Clone, Default)]
pub struct PromotionLocks {
    locks: Arc<Mutex<FxHashMap<PromotionUuid, Arc<AsyncMutex<()>>>>>,
}

impl PromotionLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive write access to `uuid`.
    pub async fn acquire(&self, uuid: PromotionUuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);

            Arc::clone(locks.entry(uuid).or_default())
        };

        lock.lock_owned().await
    }

    /// Release `guard` and drop the entry for a promotion that no longer
    /// exists. The entry stays while other tasks still hold or wait on the
    /// mutex, so they keep excluding newcomers for the same id.
    pub fn forget(&self, uuid: PromotionUuid, guard: OwnedMutexGuard<()>) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);

        drop(guard);

        if locks
            .get(&uuid)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&uuid);
        }
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
