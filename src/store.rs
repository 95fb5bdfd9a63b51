//! In-memory home of each browser session's dashboard state.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::domain::user::UserContext;
use crate::services::dashboard::Dashboard;

/// View state owned by one browser session.
#[derive(Debug, Clone, Default)]
pub struct DashboardSession {
    pub dashboard: Dashboard,
    pub user: Option<UserContext>,
}

struct Entry {
    session: DashboardSession,
    touched: Instant,
}

/// Map from session id to [`DashboardSession`].
///
/// Readers get clones; writers replace the whole entry. Two overlapping
/// requests for the same session therefore race and the last write wins.
pub struct DashboardStore {
    entries: Mutex<HashMap<Uuid, Entry>>,
    ttl: Duration,
}

impl DashboardStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn prune(&self, entries: &mut HashMap<Uuid, Entry>, now: Instant) {
        let before = entries.len();
        entries.retain(|_, entry| now.duration_since(entry.touched) <= self.ttl);
        let pruned = before - entries.len();
        if pruned > 0 {
            log::debug!("Pruned {pruned} idle dashboard sessions");
        }
    }

    pub fn load(&self, id: Uuid) -> Option<DashboardSession> {
        let now = Instant::now();
        let mut entries = self.lock();
        self.prune(&mut entries, now);
        entries.get_mut(&id).map(|entry| {
            entry.touched = now;
            entry.session.clone()
        })
    }

    pub fn save(&self, id: Uuid, session: DashboardSession) {
        let now = Instant::now();
        let mut entries = self.lock();
        self.prune(&mut entries, now);
        entries.insert(
            id,
            Entry {
                session,
                touched: now,
            },
        );
    }

    /// Flags the stored dashboard as fetching so renders issued while the
    /// backend call is pending show the loading row. Returns `false` when
    /// the session has no stored state.
    pub fn mark_loading(&self, id: Uuid) -> bool {
        let now = Instant::now();
        let mut entries = self.lock();
        self.prune(&mut entries, now);
        match entries.get_mut(&id) {
            Some(entry) => {
                entry.touched = now;
                entry.session.dashboard.mark_loading();
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
