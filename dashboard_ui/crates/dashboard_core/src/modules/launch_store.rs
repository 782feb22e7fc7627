use crate::modules::error::{DashboardError, RemoteContext};
use crate::modules::protocol::{ItemId, LaunchItem, NewLaunchItem};
use crate::modules::remote::{RemoteClient, RequestOptions};

const FETCH_FAILED: &str = "Failed to fetch launch items";
const ADD_FAILED: &str = "Failed to add launch item";
const LAUNCH_FAILED: &str = "Failed to launch item";

/// Remote launcher collection. Holds no cache of its own; callers re-list after
/// a create to pick up the server-assigned id.
#[derive(Debug, Clone)]
pub struct LaunchItemStore {
    client: RemoteClient,
}

impl LaunchItemStore {
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }

    pub async fn list_all(&self) -> Result<Vec<LaunchItem>, DashboardError> {
        let url = self.client.endpoint(&["launch-items"]);
        self.client
            .request_json(url, RequestOptions::get())
            .await
            .context(FETCH_FAILED)
    }

    pub async fn create(&self, name: &str, path: &str) -> Result<(), DashboardError> {
        let body = NewLaunchItem {
            name: name.to_string(),
            path: path.to_string(),
        };
        let options = RequestOptions::post().json(&body).context(ADD_FAILED)?;
        let url = self.client.endpoint(&["launch-items"]);
        self.client.request(url, options).await.context(ADD_FAILED)?;
        tracing::info!(name, path, "launch item created");
        Ok(())
    }

    /// Asks the service to launch the target. Never changes the collection.
    pub async fn trigger(&self, id: &ItemId) -> Result<(), DashboardError> {
        let id = id.to_string();
        let url = self.client.endpoint(&["launch", "id", &id]);
        self.client
            .request(url, RequestOptions::post())
            .await
            .context(LAUNCH_FAILED)?;
        tracing::info!(%id, "launch triggered");
        Ok(())
    }
}
