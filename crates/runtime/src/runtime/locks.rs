use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use march_core::UnitId;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Guard proving exclusive access to one or two units.
pub(crate) struct UnitGuard {
    _first: OwnedMutexGuard<()>,
    _second: Option<OwnedMutexGuard<()>>,
}

/// One async mutex per unit.
///
/// Every mutating operation holds the unit's lock across validation, any
/// collaborator call, application of the result and the save.
#[derive(Default)]
pub(crate) struct UnitLocks {
    locks: Mutex<HashMap<UnitId, Arc<AsyncMutex<()>>>>,
}

impl UnitLocks {
    fn entry(&self, unit: UnitId) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(unit).or_default())
    }

    pub(crate) async fn lock(&self, unit: UnitId) -> UnitGuard {
        UnitGuard {
            _first: self.entry(unit).lock_owned().await,
            _second: None,
        }
    }

    /// Locks two units in id order so opposing pairs cannot deadlock.
    pub(crate) async fn lock_pair(&self, a: UnitId, b: UnitId) -> UnitGuard {
        if a == b {
            return self.lock(a).await;
        }
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        let first = self.entry(low).lock_owned().await;
        let second = self.entry(high).lock_owned().await;
        UnitGuard {
            _first: first,
            _second: Some(second),
        }
    }

    /// Drops the lock entry of a unit that left play.
    pub(crate) fn forget(&self, unit: UnitId) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.remove(&unit);
    }
}
