use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use log::info;
use uuid::Uuid;

use super::{BaselineDataset, DatasetError, SessionDataset};

/// One [`SessionDataset`] per client session, all sharing one baseline.
///
/// Each session has its own lock, so removals in one session are serialized
/// against reads of that session and never visible to any other.
#[derive(Debug)]
pub struct SessionRegistry {
    baseline: Arc<BaselineDataset>,
    sessions: Mutex<HashMap<Uuid, Arc<Mutex<SessionDataset>>>>,
}

impl SessionRegistry {
    /// Create a registry over a baseline
    pub fn new(baseline: Arc<BaselineDataset>) -> Self {
        Self {
            baseline,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// The shared baseline
    pub fn baseline(&self) -> &Arc<BaselineDataset> {
        &self.baseline
    }

    /// Open a new session and return its identity
    pub fn open(&self) -> Result<Uuid, DatasetError> {
        let id = Uuid::new_v4();
        let session = SessionDataset::new(Arc::clone(&self.baseline));
        self.sessions
            .lock()
            .map_err(|_| DatasetError::SessionPoisoned)?
            .insert(id, Arc::new(Mutex::new(session)));
        info!("Opened session {}", id);
        Ok(id)
    }

    /// Close a session. Returns false when it was not open.
    pub fn close(&self, id: Uuid) -> Result<bool, DatasetError> {
        let removed = self
            .sessions
            .lock()
            .map_err(|_| DatasetError::SessionPoisoned)?
            .remove(&id)
            .is_some();
        if removed {
            info!("Closed session {}", id);
        }
        Ok(removed)
    }

    /// Number of open sessions
    pub fn len(&self) -> Result<usize, DatasetError> {
        Ok(self
            .sessions
            .lock()
            .map_err(|_| DatasetError::SessionPoisoned)?
            .len())
    }

    /// True when no session is open
    pub fn is_empty(&self) -> Result<bool, DatasetError> {
        Ok(self.len()? == 0)
    }

    /// Run an action against one session while holding that session's lock
    pub fn with_session<T, F>(&self, id: Uuid, action: F) -> Result<T, DatasetError>
    where
        F: FnOnce(&mut SessionDataset) -> T,
    {
        let session = self
            .sessions
            .lock()
            .map_err(|_| DatasetError::SessionPoisoned)?
            .get(&id)
            .cloned()
            .ok_or(DatasetError::UnknownSession(id))?;

        let mut guard = session.lock().map_err(|_| DatasetError::SessionPoisoned)?;
        Ok(action(&mut guard))
    }
}
