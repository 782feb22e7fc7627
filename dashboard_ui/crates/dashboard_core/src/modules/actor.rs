use crate::modules::protocol::ItemId;
use crate::modules::view_state::{DashboardSnapshot, ViewState};
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

pub const INTENT_CAP: usize = 32;

/// User intents forwarded by presentation, unchanged.
#[derive(Debug, Clone)]
pub enum UiIntent {
    Launch(ItemId),
    AddLauncher { name: String, path: String },
    AddNote { title: String, content: String },
    DeleteNote(ItemId),
    Reload,
}

#[derive(Debug, Error)]
pub enum ActorError {
    #[error("dashboard actor unavailable")]
    Unavailable,
}

#[derive(Debug, Clone)]
pub struct DashboardHandle {
    tx: mpsc::Sender<UiIntent>,
    snapshots: watch::Receiver<DashboardSnapshot>,
}

impl DashboardHandle {
    pub async fn launch(&self, id: ItemId) -> Result<(), ActorError> {
        self.send(UiIntent::Launch(id)).await
    }

    pub async fn add_launcher(
        &self,
        name: impl Into<String>,
        path: impl Into<String>,
    ) -> Result<(), ActorError> {
        self.send(UiIntent::AddLauncher {
            name: name.into(),
            path: path.into(),
        })
        .await
    }

    pub async fn add_note(
        &self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<(), ActorError> {
        self.send(UiIntent::AddNote {
            title: title.into(),
            content: content.into(),
        })
        .await
    }

    pub async fn delete_note(&self, id: ItemId) -> Result<(), ActorError> {
        self.send(UiIntent::DeleteNote(id)).await
    }

    pub async fn reload(&self) -> Result<(), ActorError> {
        self.send(UiIntent::Reload).await
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardSnapshot> {
        self.snapshots.clone()
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.snapshots.borrow().clone()
    }

    async fn send(&self, intent: UiIntent) -> Result<(), ActorError> {
        self.tx.send(intent).await.map_err(|_| ActorError::Unavailable)
    }
}

/// Moves the view onto its own task. The task runs the initial load, then
/// applies intents one at a time until every handle is dropped.
pub fn spawn(view: ViewState) -> (DashboardHandle, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(INTENT_CAP);
    let (snapshot_tx, snapshot_rx) = watch::channel(view.snapshot());
    let task = tokio::spawn(run(rx, view, snapshot_tx));
    (
        DashboardHandle {
            tx,
            snapshots: snapshot_rx,
        },
        task,
    )
}

pub async fn run(
    mut rx: mpsc::Receiver<UiIntent>,
    mut view: ViewState,
    snapshots: watch::Sender<DashboardSnapshot>,
) {
    view.load().await;
    snapshots.send_replace(view.snapshot());

    while let Some(intent) = rx.recv().await {
        tracing::debug!(?intent, "applying intent");
        apply(&mut view, intent).await;
        snapshots.send_replace(view.snapshot());
    }

    tracing::debug!("all dashboard handles dropped, actor exiting");
}

async fn apply(view: &mut ViewState, intent: UiIntent) {
    // Failures are already recorded on the view for presentation.
    match intent {
        UiIntent::Launch(id) => {
            let _ = view.launch(&id).await;
        }
        UiIntent::AddLauncher { name, path } => {
            let _ = view.add_launcher(&name, &path).await;
        }
        UiIntent::AddNote { title, content } => {
            let _ = view.add_note(&title, &content).await;
        }
        UiIntent::DeleteNote(id) => {
            view.delete_note(&id).await;
        }
        UiIntent::Reload => view.reload().await,
    }
}
