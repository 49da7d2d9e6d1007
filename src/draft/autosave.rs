//! The persistence controller: load-once hydration, debounced autosave, and
//! the save routine shared by manual and automatic saves.
//!
//! Saves are serialized through a single in-flight guard: an autosave
//! deadline firing while a save is running is skipped (the draft stays
//! dirty), and a manual save requested while busy runs as soon as the
//! current one completes. No two remote calls overlap.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use crate::remote::{RemoteClient, RemoteError, SavePayload};

use super::reducer::Action;
use super::state::{DraftSnapshot, WizardState};
use super::store::{DraftStore, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    Manual,
    Autosave,
}

impl SaveKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SaveKind::Manual => "manual",
            SaveKind::Autosave => "autosave",
        }
    }
}

/// Result of one remote call, reported back to the event loop
#[derive(Debug)]
struct SaveOutcome {
    kind: SaveKind,
    generation: u64,
    result: Result<(), RemoteError>,
}

/// Last-change-wins debounce: each rearm pushes the deadline out; firing
/// clears it until the next rearm.
#[derive(Debug)]
pub struct DebounceTimer {
    window: Duration,
    deadline: Option<Instant>,
}

impl DebounceTimer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    pub fn rearm(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    pub fn clear(&mut self) {
        self.deadline = None;
    }

    pub fn armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once per elapsed deadline
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

pub struct SaveCoordinator {
    store: Arc<dyn DraftStore>,
    remote: Arc<dyn RemoteClient>,
    timer: DebounceTimer,
    manual_clears_dirty: bool,
    hydrated: bool,
    in_flight: bool,
    pending_manual: bool,
    /// Bumped on reset so outcomes for the discarded draft are dropped
    generation: u64,
    outcome_tx: mpsc::UnboundedSender<SaveOutcome>,
    outcome_rx: mpsc::UnboundedReceiver<SaveOutcome>,
}

impl SaveCoordinator {
    pub fn new(
        store: Arc<dyn DraftStore>,
        remote: Arc<dyn RemoteClient>,
        debounce: Duration,
        manual_clears_dirty: bool,
    ) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        Self {
            store,
            remote,
            timer: DebounceTimer::new(debounce),
            manual_clears_dirty,
            hydrated: false,
            in_flight: false,
            pending_manual: false,
            generation: 0,
            outcome_tx,
            outcome_rx,
        }
    }

    /// One-time load of the stored snapshot. Absence and parse failures fall
    /// back to defaults without surfacing anything to the user.
    pub fn hydrate(&mut self) -> Option<Action> {
        self.hydrated = true;
        match self.store.load() {
            Ok(Some(snapshot)) => {
                tracing::info!(draft_id = %snapshot.draft_id, step = snapshot.step.key(), "restored draft");
                Some(Action::Hydrate(snapshot))
            }
            Ok(None) => None,
            Err(err) => {
                tracing::debug!(error = %err, "ignoring unreadable draft, starting fresh");
                None
            }
        }
    }

    /// Called on every field change; rearms the autosave deadline
    pub fn note_change(&mut self, now: Instant) {
        if self.hydrated {
            self.timer.rearm(now);
        }
    }

    pub fn saving(&self) -> bool {
        self.in_flight
    }

    /// The shared save routine. Writes the snapshot synchronously, then
    /// starts one remote call; the outcome is picked up by [`Self::tick`].
    pub fn request_save(&mut self, state: &WizardState, kind: SaveKind) -> Vec<Action> {
        if self.in_flight {
            if kind == SaveKind::Manual {
                self.pending_manual = true;
            }
            return Vec::new();
        }
        self.timer.clear();

        let snapshot = DraftSnapshot::capture(state);
        if let Err(err) = self.store.save(&snapshot) {
            tracing::warn!(error = %err, "local draft write failed");
            return vec![Action::SetError(Some(err.to_string()))];
        }

        let payload = SavePayload {
            draft_id: state.draft_id,
            step: state.step,
            data: state.data.clone(),
        };
        let remote = Arc::clone(&self.remote);
        let tx = self.outcome_tx.clone();
        let generation = self.generation;
        self.in_flight = true;
        tracing::debug!(kind = kind.as_str(), step = state.step.key(), "save started");

        tokio::spawn(async move {
            let result = remote.save(&payload).await;
            // Receiver only goes away on shutdown
            let _ = tx.send(SaveOutcome {
                kind,
                generation,
                result,
            });
        });

        vec![Action::SetSaving(true), Action::SetError(None)]
    }

    /// Drive the controller: collect finished saves and fire the autosave
    /// deadline. Returns the actions to apply, in order.
    pub fn tick(&mut self, state: &WizardState, now: Instant) -> Vec<Action> {
        let mut actions = Vec::new();

        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.in_flight = false;
            if outcome.generation != self.generation {
                tracing::debug!("dropping save outcome from a discarded draft");
                continue;
            }
            match outcome.result {
                Ok(()) => {
                    tracing::info!(kind = outcome.kind.as_str(), "draft synced");
                    actions.push(Action::SetSavedAt(None));
                }
                Err(err) => {
                    tracing::warn!(kind = outcome.kind.as_str(), error = %err, "remote save failed");
                    actions.push(Action::SetError(Some(err.to_string())));
                    // The local snapshot was written, so a manual save still
                    // counts as "saved" under the default policy
                    if outcome.kind == SaveKind::Manual && self.manual_clears_dirty {
                        actions.push(Action::SetDirty(false));
                    }
                }
            }
            actions.push(Action::SetSaving(false));

            if self.pending_manual {
                self.pending_manual = false;
                actions.extend(self.request_save(state, SaveKind::Manual));
            }
        }

        if self.timer.fire(now) && state.dirty && !self.in_flight {
            actions.extend(self.request_save(state, SaveKind::Autosave));
        }

        actions
    }

    /// Delete the stored draft and forget any pending work. The caller
    /// rebuilds the state from defaults, as if the process relaunched.
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.store.delete()?;
        self.timer.clear();
        self.pending_manual = false;
        self.generation += 1;
        Ok(())
    }
}
