//! `WizardStore` — the single source of truth for wizard state.
//!
//! One owned mutable `WizardState` behind an `RwLock`, injected rather than
//! global. Every mutation is atomic per call, publishes the committed state
//! on a watch channel for dependents, and writes a best-effort snapshot to
//! the injected [`SnapshotStore`]. Snapshot failures are logged and
//! swallowed; the in-memory state stays authoritative for the session.

use std::sync::Arc;

use tokio::sync::{RwLock, watch};

use crate::store::SnapshotStore;

use super::model::{Step1Patch, Step2Patch, Step3Patch, snapshot_keys};
use super::state::WizardState;

/// Process-wide wizard state container.
pub struct WizardStore {
    state: RwLock<WizardState>,
    snapshots: Arc<dyn SnapshotStore>,
    watch_tx: watch::Sender<WizardState>,
}

impl WizardStore {
    /// Open the store, rehydrating from the last snapshot if one exists.
    ///
    /// A missing snapshot starts from defaults; an unreadable one logs a
    /// warning and starts from defaults rather than failing startup.
    pub async fn open(snapshots: Arc<dyn SnapshotStore>) -> Self {
        let state = match snapshots.load(snapshot_keys::WIZARD_STATE).await {
            Ok(Some(value)) => match serde_json::from_value::<WizardState>(value) {
                Ok(state) => state,
                Err(e) => {
                    tracing::warn!("Discarding unreadable wizard snapshot: {e}");
                    WizardState::default()
                }
            },
            Ok(None) => WizardState::default(),
            Err(e) => {
                tracing::warn!("Failed to load wizard snapshot: {e}");
                WizardState::default()
            }
        };

        let (watch_tx, _) = watch::channel(state.clone());
        Self {
            state: RwLock::new(state),
            snapshots,
            watch_tx,
        }
    }

    /// Clone of the current state.
    pub async fn state(&self) -> WizardState {
        self.state.read().await.clone()
    }

    /// Active step index.
    pub async fn current_step(&self) -> u8 {
        self.state.read().await.current_step
    }

    /// Subscribe to committed state changes.
    pub fn subscribe(&self) -> watch::Receiver<WizardState> {
        self.watch_tx.subscribe()
    }

    /// Set the step directly. Bounds are the caller's responsibility; the
    /// clamped [`next_step`]/[`prev_step`] pair is the public navigation path.
    ///
    /// [`next_step`]: Self::next_step
    /// [`prev_step`]: Self::prev_step
    pub async fn set_current_step(&self, step: u8) {
        self.mutate(|state| state.current_step = step).await;
    }

    pub async fn next_step(&self) {
        self.mutate(WizardState::next_step).await;
    }

    pub async fn prev_step(&self) {
        self.mutate(WizardState::prev_step).await;
    }

    /// Shallow-merge a partial update into step 1. Never validates; the step
    /// controller validates before treating a merge as a commit.
    pub async fn update_step1(&self, patch: Step1Patch) {
        self.mutate(|state| state.form_data.step1.apply(patch)).await;
    }

    pub async fn update_step2(&self, patch: Step2Patch) {
        self.mutate(|state| state.form_data.step2.apply(patch)).await;
    }

    pub async fn update_step3(&self, patch: Step3Patch) {
        self.mutate(|state| state.form_data.step3.apply(patch)).await;
    }

    pub async fn set_submitted(&self, submitted: bool) {
        self.mutate(|state| state.is_submitted = submitted).await;
    }

    /// Restore the full initial state, including `current_step = 1`.
    pub async fn reset(&self) {
        self.mutate(|state| *state = WizardState::default()).await;
    }

    /// Apply a mutation atomically, notify subscribers, persist best-effort.
    async fn mutate(&self, apply: impl FnOnce(&mut WizardState)) {
        let committed = {
            let mut state = self.state.write().await;
            apply(&mut state);
            state.clone()
        };
        self.watch_tx.send_replace(committed.clone());
        self.persist(&committed).await;
    }

    async fn persist(&self, state: &WizardState) {
        let value = match serde_json::to_value(state) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("Failed to serialize wizard snapshot: {e}");
                return;
            }
        };
        if let Err(e) = self.snapshots.save(snapshot_keys::WIZARD_STATE, &value).await {
            tracing::warn!("Failed to persist wizard snapshot: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::store::MemoryBackend;
    use crate::wizard::model::{AccountType, Country};
    use crate::wizard::state::TOTAL_STEPS;
    use async_trait::async_trait;

    async fn memory_store() -> WizardStore {
        WizardStore::open(Arc::new(MemoryBackend::new())).await
    }

    #[tokio::test]
    async fn starts_from_defaults_without_snapshot() {
        let store = memory_store().await;
        assert_eq!(store.state().await, WizardState::default());
    }

    #[tokio::test]
    async fn navigation_clamps_at_bounds() {
        let store = memory_store().await;

        store.prev_step().await;
        assert_eq!(store.current_step().await, 1);

        for _ in 0..10 {
            store.next_step().await;
        }
        assert_eq!(store.current_step().await, TOTAL_STEPS);
    }

    #[tokio::test]
    async fn updates_merge_into_partitions() {
        let store = memory_store().await;
        store
            .update_step1(Step1Patch {
                full_name: Some("Jane Doe".into()),
                country: Some(Some(Country::In)),
                ..Default::default()
            })
            .await;
        store
            .update_step2(Step2Patch {
                account_type: Some(Some(AccountType::Individual)),
                ..Default::default()
            })
            .await;

        let state = store.state().await;
        assert_eq!(state.form_data.step1.full_name, "Jane Doe");
        assert_eq!(state.form_data.step1.country, Some(Country::In));
        assert_eq!(
            state.form_data.step2.account_type,
            Some(AccountType::Individual)
        );
        // Untouched fields keep their defaults.
        assert_eq!(state.form_data.step2.monthly_volume, 50.0);
    }

    #[tokio::test]
    async fn empty_patch_leaves_partition_unchanged() {
        let store = memory_store().await;
        let before = store.state().await.form_data.step2;
        store.update_step2(Step2Patch::default()).await;
        assert_eq!(store.state().await.form_data.step2, before);
    }

    #[tokio::test]
    async fn reset_restores_initial_state() {
        let store = memory_store().await;
        store
            .update_step1(Step1Patch {
                full_name: Some("Jane".into()),
                ..Default::default()
            })
            .await;
        store.next_step().await;
        store.set_submitted(true).await;

        store.reset().await;
        assert_eq!(store.state().await, WizardState::default());
    }

    #[tokio::test]
    async fn mutations_rehydrate_across_instances() {
        let backend = Arc::new(MemoryBackend::new());

        let store = WizardStore::open(Arc::clone(&backend) as Arc<dyn SnapshotStore>).await;
        store
            .update_step1(Step1Patch {
                email: Some("jane@x.com".into()),
                ..Default::default()
            })
            .await;
        store.next_step().await;
        let expected = store.state().await;
        drop(store);

        let reopened = WizardStore::open(backend).await;
        assert_eq!(reopened.state().await, expected);
    }

    #[tokio::test]
    async fn corrupt_snapshot_falls_back_to_defaults() {
        let backend = Arc::new(MemoryBackend::new());
        backend
            .save(snapshot_keys::WIZARD_STATE, &serde_json::json!("not a state"))
            .await
            .unwrap();

        let store = WizardStore::open(backend).await;
        assert_eq!(store.state().await, WizardState::default());
    }

    struct FailingBackend;

    #[async_trait]
    impl SnapshotStore for FailingBackend {
        async fn load(&self, _key: &str) -> Result<Option<serde_json::Value>, StorageError> {
            Err(StorageError::Pool("offline".into()))
        }
        async fn save(
            &self,
            _key: &str,
            _value: &serde_json::Value,
        ) -> Result<(), StorageError> {
            Err(StorageError::Query("disk full".into()))
        }
        async fn delete(&self, _key: &str) -> Result<bool, StorageError> {
            Err(StorageError::Query("disk full".into()))
        }
    }

    #[tokio::test]
    async fn persistence_failure_does_not_poison_state() {
        let store = WizardStore::open(Arc::new(FailingBackend)).await;
        store
            .update_step1(Step1Patch {
                full_name: Some("Jane".into()),
                ..Default::default()
            })
            .await;
        store.next_step().await;

        let state = store.state().await;
        assert_eq!(state.form_data.step1.full_name, "Jane");
        assert_eq!(state.current_step, 2);
    }

    #[tokio::test]
    async fn subscribers_observe_commits() {
        let store = memory_store().await;
        let mut rx = store.subscribe();

        store.next_step().await;
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().current_step, 2);
    }
}
