//! Debounced autosave
//!
//! A save is a deferred action: scheduling replaces any pending save, so only
//! the newest novel is written once the document has been idle for the
//! debounce window. A failed write stays queued and is retried on the next
//! poll. Time is passed in by the caller; nothing here sleeps or spawns.

use crate::model::Novel;
use crate::storage::NovelStore;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Outcome reported to the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Idle,
    Pending,
    Saved,
    Failed(String),
}

#[derive(Debug, Clone)]
struct PendingSave {
    novel: Novel,
    due: Instant,
}

#[derive(Debug, Clone)]
pub struct AutosaveScheduler {
    debounce: Duration,
    pending: Option<PendingSave>,
}

impl AutosaveScheduler {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            pending: None,
        }
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Queue `novel` for saving at `now + debounce`, superseding any pending save
    pub fn schedule(&mut self, novel: Novel, now: Instant) {
        if self.pending.is_some() {
            debug!("Autosave superseded by a newer edit");
        }
        self.pending = Some(PendingSave {
            novel,
            due: now + self.debounce,
        });
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn due_at(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.due)
    }

    /// Take the pending novel once its debounce window has passed
    pub fn take_due(&mut self, now: Instant) -> Option<Novel> {
        let due = self.pending.as_ref().is_some_and(|pending| pending.due <= now);
        if !due {
            return None;
        }
        self.pending.take().map(|pending| pending.novel)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Write the pending novel if it is due
    pub fn flush(&mut self, store: &mut dyn NovelStore, now: Instant) -> SaveStatus {
        match self.take_due(now) {
            Some(novel) => self.write(store, novel, now),
            None if self.is_pending() => SaveStatus::Pending,
            None => SaveStatus::Idle,
        }
    }

    fn write(&mut self, store: &mut dyn NovelStore, novel: Novel, now: Instant) -> SaveStatus {
        match store.save(&novel) {
            Ok(()) => SaveStatus::Saved,
            Err(err) => {
                warn!(error = %err, "Autosave failed, keeping it queued");
                self.pending = Some(PendingSave { novel, due: now });
                SaveStatus::Failed(err.to_string())
            }
        }
    }
}
