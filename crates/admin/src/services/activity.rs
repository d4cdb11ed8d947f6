//! Bounded in-memory activity log.
//!
//! A ring of the most recent events, kept per process for the dashboard's
//! activity panel. This is not an audit trail; durable history belongs in
//! tracing output.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kinds of recorded events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Login,
    Logout,
    ApiCall,
    Sync,
    Error,
}

/// One recorded event, newest entries first in listings.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityEntry {
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "tipo")]
    pub kind: ActivityKind,
    #[serde(rename = "mensaje")]
    pub message: String,
    #[serde(rename = "usuario", skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// Shared bounded event ring. Cloning shares the same buffer.
#[derive(Clone)]
pub struct ActivityLog {
    entries: Arc<Mutex<VecDeque<ActivityEntry>>>,
    capacity: usize,
}

impl ActivityLog {
    /// Create a log that retains the `capacity` most recent entries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
        }
    }

    /// Record one event, evicting the oldest entry when full.
    pub fn record(
        &self,
        kind: ActivityKind,
        message: impl Into<String>,
        username: Option<&str>,
    ) {
        let entry = ActivityEntry {
            timestamp: Utc::now(),
            kind,
            message: message.into(),
            username: username.map(str::to_owned),
        };

        // A poisoned lock means another thread panicked mid-push; the ring
        // is still structurally sound, so keep going.
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Snapshot of recent entries, newest first, optionally filtered by kind.
    #[must_use]
    pub fn recent(&self, kind: Option<ActivityKind>) -> Vec<ActivityEntry> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries
            .iter()
            .rev()
            .filter(|e| kind.is_none_or(|k| e.kind == k))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oldest_entry_is_evicted_at_capacity() {
        let log = ActivityLog::new(3);
        for i in 0..5 {
            log.record(ActivityKind::ApiCall, format!("evento {i}"), None);
        }

        let entries = log.recent(None);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].message, "evento 4");
        assert_eq!(entries[2].message, "evento 2");
    }

    #[test]
    fn test_recent_filters_by_kind() {
        let log = ActivityLog::new(10);
        log.record(ActivityKind::Login, "entra ana", Some("ana"));
        log.record(ActivityKind::Sync, "sync productos", None);
        log.record(ActivityKind::Login, "entra luis", Some("luis"));

        let logins = log.recent(Some(ActivityKind::Login));
        assert_eq!(logins.len(), 2);
        assert_eq!(logins[0].username.as_deref(), Some("luis"));
    }

    #[test]
    fn test_clones_share_the_buffer() {
        let log = ActivityLog::new(4);
        let clone = log.clone();
        clone.record(ActivityKind::Error, "fallo", None);

        assert_eq!(log.recent(None).len(), 1);
    }
}
