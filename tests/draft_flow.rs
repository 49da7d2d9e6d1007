//! End-to-end tests of the save pipeline: reducer, store, coordinator, and
//! remote sync wired together the way the app wires them.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use kaisetsu::draft::autosave::{SaveCoordinator, SaveKind};
use kaisetsu::draft::path::{FieldPath, FieldValue};
use kaisetsu::draft::reducer::{reduce, Action};
use kaisetsu::draft::state::{WizardState, WizardStep};
use kaisetsu::draft::store::{DraftStore, MemoryDraftStore};
use kaisetsu::remote::{RemoteClient, RemoteError, SavePayload};

/// Remote double that counts calls and answers from a script
struct CountingRemote {
    calls: AtomicUsize,
    fail: bool,
    latency: Duration,
}

impl CountingRemote {
    fn succeeding() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: false,
            latency: Duration::ZERO,
        }
    }

    fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
            latency: Duration::ZERO,
        }
    }

    fn slow(latency: Duration) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: false,
            latency,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteClient for CountingRemote {
    async fn save(&self, _payload: &SavePayload) -> Result<(), RemoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.fail {
            Err(RemoteError::Rejected("draft rejected".to_string()))
        } else {
            Ok(())
        }
    }
}

fn apply(state: &mut WizardState, actions: Vec<Action>) {
    for action in actions {
        *state = reduce(state, action);
    }
}

/// Poll the coordinator until the in-flight save reports back
async fn wait_for_outcome(
    coordinator: &mut SaveCoordinator,
    state: &mut WizardState,
) {
    for _ in 0..100 {
        tokio::time::sleep(Duration::from_millis(5)).await;
        let actions = coordinator.tick(state, Instant::now());
        if !actions.is_empty() {
            apply(state, actions);
            return;
        }
    }
    panic!("save outcome never arrived");
}

fn dirty_state() -> WizardState {
    let state = WizardState::default();
    reduce(
        &state,
        Action::Change(
            FieldPath::AccountEmail,
            FieldValue::Text("taro@example.co.jp".to_string()),
        ),
    )
}

#[tokio::test]
async fn manual_save_with_failing_remote_keeps_the_local_snapshot() {
    let store = Arc::new(MemoryDraftStore::new());
    let remote = Arc::new(CountingRemote::failing());
    let mut coordinator = SaveCoordinator::new(
        Arc::clone(&store) as Arc<dyn DraftStore>,
        Arc::clone(&remote) as Arc<dyn RemoteClient>,
        Duration::from_millis(1500),
        true,
    );
    coordinator.hydrate();

    let mut state = dirty_state();
    assert!(state.dirty);

    let actions = coordinator.request_save(&state, SaveKind::Manual);
    apply(&mut state, actions);
    assert!(state.saving);
    assert!(state.error.is_none());

    wait_for_outcome(&mut coordinator, &mut state).await;

    // Default policy: the local write makes a manual save count as saved
    // even though the remote rejected it
    assert!(!state.dirty);
    assert!(!state.saving);
    assert!(state.error.as_deref().unwrap().contains("rejected"));
    assert_eq!(remote.calls(), 1);

    let snapshot = store.load().unwrap().expect("snapshot written");
    assert_eq!(
        snapshot.data.account.as_ref().unwrap().email,
        "taro@example.co.jp"
    );
}

#[tokio::test]
async fn strict_policy_keeps_dirty_when_the_remote_fails() {
    let store = Arc::new(MemoryDraftStore::new());
    let remote = Arc::new(CountingRemote::failing());
    let mut coordinator = SaveCoordinator::new(
        store,
        remote,
        Duration::from_millis(1500),
        false,
    );
    coordinator.hydrate();

    let mut state = dirty_state();
    let actions = coordinator.request_save(&state, SaveKind::Manual);
    apply(&mut state, actions);
    wait_for_outcome(&mut coordinator, &mut state).await;

    assert!(state.dirty);
    assert!(state.error.is_some());
}

#[tokio::test]
async fn two_changes_in_one_window_coalesce_into_a_single_autosave() {
    let store = Arc::new(MemoryDraftStore::new());
    let remote = Arc::new(CountingRemote::succeeding());
    let mut coordinator = SaveCoordinator::new(
        store,
        Arc::clone(&remote) as Arc<dyn RemoteClient>,
        Duration::from_millis(1500),
        true,
    );
    coordinator.hydrate();

    let mut state = dirty_state();
    let t0 = Instant::now();
    coordinator.note_change(t0);
    state = reduce(
        &state,
        Action::Change(
            FieldPath::AccountPassword,
            FieldValue::Text("longenough1".to_string()),
        ),
    );
    coordinator.note_change(t0 + Duration::from_millis(500));

    // Quiet period restarted by the second change: nothing at t0+1.6s
    let actions = coordinator.tick(&state, t0 + Duration::from_millis(1600));
    assert!(actions.is_empty());
    assert_eq!(remote.calls(), 0);

    // Fires once the window after the last change has elapsed
    let actions = coordinator.tick(&state, t0 + Duration::from_millis(2100));
    apply(&mut state, actions);
    assert!(state.saving);

    wait_for_outcome(&mut coordinator, &mut state).await;
    assert_eq!(remote.calls(), 1);
    assert!(!state.dirty);
    assert!(state.saved_at.is_some());

    // Nothing left armed; later ticks stay quiet
    let actions = coordinator.tick(&state, t0 + Duration::from_secs(60));
    assert!(actions.is_empty());
    assert_eq!(remote.calls(), 1);
}

#[tokio::test]
async fn autosave_deadline_is_skipped_while_a_save_is_in_flight() {
    let store = Arc::new(MemoryDraftStore::new());
    let remote = Arc::new(CountingRemote::slow(Duration::from_millis(200)));
    let mut coordinator = SaveCoordinator::new(
        store,
        Arc::clone(&remote) as Arc<dyn RemoteClient>,
        Duration::from_millis(50),
        true,
    );
    coordinator.hydrate();

    let mut state = dirty_state();
    let t0 = Instant::now();
    coordinator.note_change(t0);

    let actions = coordinator.request_save(&state, SaveKind::Manual);
    apply(&mut state, actions);

    // The armed deadline elapses while the manual save is still running;
    // no second remote call starts
    let actions = coordinator.tick(&state, t0 + Duration::from_millis(100));
    assert!(actions.is_empty());
    assert_eq!(remote.calls(), 1);

    wait_for_outcome(&mut coordinator, &mut state).await;
    assert_eq!(remote.calls(), 1);
}

#[tokio::test]
async fn manual_save_while_busy_runs_after_the_current_one() {
    let store = Arc::new(MemoryDraftStore::new());
    let remote = Arc::new(CountingRemote::slow(Duration::from_millis(100)));
    let mut coordinator = SaveCoordinator::new(
        store,
        Arc::clone(&remote) as Arc<dyn RemoteClient>,
        Duration::from_millis(1500),
        true,
    );
    coordinator.hydrate();

    let mut state = dirty_state();
    let actions = coordinator.request_save(&state, SaveKind::Manual);
    apply(&mut state, actions);

    // Second request while busy is remembered, not started
    let actions = coordinator.request_save(&state, SaveKind::Manual);
    assert!(actions.is_empty());
    assert_eq!(remote.calls(), 1);

    // First outcome arrives and the remembered save starts
    wait_for_outcome(&mut coordinator, &mut state).await;
    assert!(state.saving);
    assert_eq!(remote.calls(), 2);

    wait_for_outcome(&mut coordinator, &mut state).await;
    assert!(!state.saving);
}

#[tokio::test]
async fn hydration_restores_step_and_data_once() {
    let store = Arc::new(MemoryDraftStore::new());

    // A previous session saved a draft on the company step
    {
        let mut seed = dirty_state();
        seed = reduce(&seed, Action::Navigate(WizardStep::Company));
        seed = reduce(
            &seed,
            Action::Change(
                FieldPath::CompanyNameJa,
                FieldValue::Text("株式会社テスト".to_string()),
            ),
        );
        let snapshot = kaisetsu::draft::state::DraftSnapshot::capture(&seed);
        store.save(&snapshot).unwrap();
    }

    let remote = Arc::new(CountingRemote::succeeding());
    let mut coordinator = SaveCoordinator::new(
        Arc::clone(&store) as Arc<dyn DraftStore>,
        remote,
        Duration::from_millis(1500),
        true,
    );

    let action = coordinator.hydrate().expect("stored draft found");
    let state = reduce(&WizardState::default(), action);
    assert_eq!(state.step, WizardStep::Company);
    assert_eq!(state.data.account.email, "taro@example.co.jp");
    assert_eq!(state.data.company.name_ja, "株式会社テスト");
    assert!(!state.dirty);
}
