use crate::modules::error::{DashboardError, RemoteContext, NOTE_CONTENT_REQUIRED};
use crate::modules::protocol::{ItemId, Note, NoteDraft};
use crate::modules::remote::{RemoteClient, RequestOptions};

const FETCH_FAILED: &str = "Failed to fetch notes";
const ADD_FAILED: &str = "Failed to add note";
const UPDATE_FAILED: &str = "Failed to update note";
const DELETE_FAILED: &str = "Failed to delete note";

#[derive(Debug, Clone)]
pub struct NoteStore {
    client: RemoteClient,
}

impl NoteStore {
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }

    pub async fn list_all(&self) -> Result<Vec<Note>, DashboardError> {
        let url = self.client.endpoint(&["notes"]);
        self.client
            .request_json(url, RequestOptions::get())
            .await
            .context(FETCH_FAILED)
    }

    /// Rejects blank content before anything goes over the wire.
    pub async fn create(&self, title: &str, content: &str) -> Result<(), DashboardError> {
        let draft = validated_draft(title, content)?;
        let options = RequestOptions::post().json(&draft).context(ADD_FAILED)?;
        let url = self.client.endpoint(&["notes"]);
        self.client.request(url, options).await.context(ADD_FAILED)?;
        tracing::info!(title, "note created");
        Ok(())
    }

    /// Full replacement of a note's fields. Not used by the view, which only
    /// creates and deletes.
    pub async fn update(
        &self,
        id: &ItemId,
        title: &str,
        content: &str,
    ) -> Result<(), DashboardError> {
        let draft = validated_draft(title, content)?;
        let options = RequestOptions::put().json(&draft).context(UPDATE_FAILED)?;
        let id = id.to_string();
        let url = self.client.endpoint(&["notes", &id]);
        self.client.request(url, options).await.context(UPDATE_FAILED)?;
        tracing::info!(%id, "note updated");
        Ok(())
    }

    pub async fn delete(&self, id: &ItemId) -> Result<(), DashboardError> {
        let id = id.to_string();
        let url = self.client.endpoint(&["notes", &id]);
        self.client
            .request(url, RequestOptions::delete())
            .await
            .context(DELETE_FAILED)?;
        tracing::info!(%id, "note deleted");
        Ok(())
    }
}

fn validated_draft(title: &str, content: &str) -> Result<NoteDraft, DashboardError> {
    let draft = NoteDraft::new(title, content);
    if !draft.has_content() {
        return Err(DashboardError::Invalid(NOTE_CONTENT_REQUIRED.to_string()));
    }
    Ok(draft)
}
