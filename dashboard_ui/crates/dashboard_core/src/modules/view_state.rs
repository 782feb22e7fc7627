use crate::modules::config::ClientConfig;
use crate::modules::error::DashboardError;
use crate::modules::launch_store::LaunchItemStore;
use crate::modules::note_store::NoteStore;
use crate::modules::protocol::{ItemId, LaunchItem, Note};
use crate::modules::remote::RemoteClient;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Initializing,
    Ready,
    /// At least one collection could not be fetched and is shown empty.
    ReadyWithError,
}

impl Phase {
    pub fn is_ready(self) -> bool {
        matches!(self, Phase::Ready | Phase::ReadyWithError)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    LaunchItems,
    Notes,
}

/// Everything presentation needs to render the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub phase: Phase,
    pub loading: bool,
    pub mutating: bool,
    pub error: Option<String>,
    pub degraded: Vec<Collection>,
    pub launch_items: Vec<LaunchItem>,
    pub notes: Vec<Note>,
}

/// How an optimistic note delete settled.
#[derive(Debug)]
pub enum DeleteOutcome {
    Confirmed,
    /// The delete failed; the cache was replaced with a fresh listing.
    Resynced(DashboardError),
    /// The delete and the corrective listing both failed; the cache keeps the
    /// optimistic removal.
    Stale {
        delete: DashboardError,
        resync: DashboardError,
    },
}

impl DeleteOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, DeleteOutcome::Confirmed)
    }

    pub fn message(&self) -> Option<String> {
        match self {
            DeleteOutcome::Confirmed => None,
            DeleteOutcome::Resynced(delete) => Some(delete.to_string()),
            DeleteOutcome::Stale { delete, resync } => Some(format!("{delete}; {resync}")),
        }
    }
}

/// Composition root: owns both cached collections and the loading/error flags.
/// The caches only change through what the stores return.
#[derive(Debug)]
pub struct ViewState {
    launchers: LaunchItemStore,
    note_store: NoteStore,

    phase: Phase,
    loading: bool,
    mutating: bool,
    error: Option<String>,
    degraded: Vec<Collection>,

    launch_items: Vec<LaunchItem>,
    notes: Vec<Note>,
}

impl ViewState {
    pub fn new(client: RemoteClient) -> Self {
        Self::with_stores(LaunchItemStore::new(client.clone()), NoteStore::new(client))
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(RemoteClient::new(config))
    }

    pub fn with_stores(launchers: LaunchItemStore, note_store: NoteStore) -> Self {
        Self {
            launchers,
            note_store,
            phase: Phase::Initializing,
            loading: true,
            mutating: false,
            error: None,
            degraded: Vec::new(),
            launch_items: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_mutating(&self) -> bool {
        self.mutating
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn degraded(&self) -> &[Collection] {
        &self.degraded
    }

    pub fn launch_items(&self) -> &[LaunchItem] {
        &self.launch_items
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn note_store(&self) -> &NoteStore {
        &self.note_store
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            phase: self.phase,
            loading: self.loading,
            mutating: self.mutating,
            error: self.error.clone(),
            degraded: self.degraded.clone(),
            launch_items: self.launch_items.clone(),
            notes: self.notes.clone(),
        }
    }

    /// Initial load. Both collections are fetched concurrently and each failure
    /// degrades only its own collection to empty. Does nothing once ready; use
    /// [`ViewState::reload`] to start over.
    pub async fn load(&mut self) {
        if self.phase != Phase::Initializing {
            tracing::debug!(phase = ?self.phase, "load skipped, already loaded");
            return;
        }
        self.loading = true;

        let (launch_items, notes) =
            tokio::join!(self.launchers.list_all(), self.note_store.list_all());

        self.degraded.clear();
        self.launch_items = or_empty(launch_items, Collection::LaunchItems, &mut self.degraded);
        self.notes = or_empty(notes, Collection::Notes, &mut self.degraded);

        self.phase = if self.degraded.is_empty() {
            Phase::Ready
        } else {
            Phase::ReadyWithError
        };
        self.loading = false;

        tracing::info!(
            phase = ?self.phase,
            launch_items = self.launch_items.len(),
            notes = self.notes.len(),
            "dashboard loaded"
        );
    }

    /// Full reload: back to initializing, then the initial load again.
    pub async fn reload(&mut self) {
        self.phase = Phase::Initializing;
        self.error = None;
        self.load().await;
    }

    pub async fn add_launcher(&mut self, name: &str, path: &str) -> Result<(), DashboardError> {
        self.begin_mutation();
        let result = match self.launchers.create(name, path).await {
            Ok(()) => self.refresh_launch_items().await,
            Err(e) => Err(e),
        };
        self.finish_mutation(result)
    }

    pub async fn launch(&mut self, id: &ItemId) -> Result<(), DashboardError> {
        self.begin_mutation();
        let result = self.launchers.trigger(id).await;
        self.finish_mutation(result)
    }

    pub async fn add_note(&mut self, title: &str, content: &str) -> Result<(), DashboardError> {
        self.begin_mutation();
        let result = match self.note_store.create(title, content).await {
            Ok(()) => self.refresh_notes().await,
            Err(e) => Err(e),
        };
        self.finish_mutation(result)
    }

    /// Removes the note locally first, then confirms with the service. A failed
    /// delete is compensated by one corrective listing.
    pub async fn delete_note(&mut self, id: &ItemId) -> DeleteOutcome {
        self.begin_mutation();

        let before = self.notes.len();
        self.notes.retain(|n| &n.id != id);
        tracing::debug!(%id, removed = before - self.notes.len(), "note removed optimistically");

        let outcome = match self.note_store.delete(id).await {
            Ok(()) => DeleteOutcome::Confirmed,
            Err(delete) => {
                tracing::warn!(%id, error = %delete, "delete failed, resyncing notes");
                match self.note_store.list_all().await {
                    Ok(notes) => {
                        self.notes = notes;
                        self.mark_fresh(Collection::Notes);
                        DeleteOutcome::Resynced(delete)
                    }
                    Err(resync) => {
                        tracing::error!(
                            %id,
                            error = %resync,
                            "resync after failed delete failed, cache may be stale"
                        );
                        DeleteOutcome::Stale { delete, resync }
                    }
                }
            }
        };

        self.mutating = false;
        self.error = outcome.message();
        outcome
    }

    fn begin_mutation(&mut self) {
        self.mutating = true;
        self.error = None;
    }

    fn finish_mutation(
        &mut self,
        result: Result<(), DashboardError>,
    ) -> Result<(), DashboardError> {
        self.mutating = false;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "mutation failed");
            self.error = Some(e.to_string());
        }
        result
    }

    async fn refresh_launch_items(&mut self) -> Result<(), DashboardError> {
        self.launch_items = self.launchers.list_all().await?;
        self.mark_fresh(Collection::LaunchItems);
        Ok(())
    }

    async fn refresh_notes(&mut self) -> Result<(), DashboardError> {
        self.notes = self.note_store.list_all().await?;
        self.mark_fresh(Collection::Notes);
        Ok(())
    }

    fn mark_fresh(&mut self, collection: Collection) {
        self.degraded.retain(|c| *c != collection);
        if self.phase == Phase::ReadyWithError && self.degraded.is_empty() {
            self.phase = Phase::Ready;
        }
    }
}

fn or_empty<T>(
    result: Result<Vec<T>, DashboardError>,
    collection: Collection,
    degraded: &mut Vec<Collection>,
) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(
                ?collection,
                error = %e,
                "initial fetch failed, showing empty collection"
            );
            degraded.push(collection);
            Vec::new()
        }
    }
}
