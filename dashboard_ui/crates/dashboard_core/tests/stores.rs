use dashboard_core::config::ClientConfig;
use dashboard_core::error::{DashboardError, NOTE_CONTENT_REQUIRED};
use dashboard_core::launch_store::LaunchItemStore;
use dashboard_core::note_store::NoteStore;
use dashboard_core::protocol::ItemId;
use dashboard_core::remote::RemoteClient;
use dashboard_mock_service::{MockService, Route};

fn client_for(service: &MockService) -> RemoteClient {
    RemoteClient::new(&ClientConfig::new(&service.base_url()).expect("valid base url"))
}

#[tokio::test]
async fn created_launcher_is_listed_with_server_id() {
    let service = MockService::spawn().await.expect("spawn mock");
    let store = LaunchItemStore::new(client_for(&service));

    assert!(store.list_all().await.unwrap().is_empty());
    store
        .create("Chrome", "/Applications/Google Chrome.app")
        .await
        .unwrap();

    let items = store.list_all().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "Chrome");
    assert_eq!(items[0].path, "/Applications/Google Chrome.app");
    assert!(matches!(items[0].id, ItemId::Number(_)));
}

#[tokio::test]
async fn trigger_reaches_service_without_touching_collection() {
    let service = MockService::seeded().await.expect("spawn mock");
    let store = LaunchItemStore::new(client_for(&service));
    let items = store.list_all().await.unwrap();
    let chrome = items.iter().find(|i| i.name == "Chrome").unwrap();

    store.trigger(&chrome.id).await.unwrap();

    assert_eq!(service.state().launched(), vec![chrome.id.clone()]);
    assert_eq!(store.list_all().await.unwrap(), items);
}

#[tokio::test]
async fn trigger_unknown_id_reports_service_error() {
    let service = MockService::seeded().await.expect("spawn mock");
    let store = LaunchItemStore::new(client_for(&service));

    let err = store.trigger(&ItemId::Number(99)).await.unwrap_err();

    assert_eq!(err.remote().map(|e| e.status()), Some(404));
    assert_eq!(err.to_string(), "Failed to launch item: launch item 99 not found");
}

#[tokio::test]
async fn blank_note_is_rejected_before_any_request() {
    let service = MockService::spawn().await.expect("spawn mock");
    let store = NoteStore::new(client_for(&service));

    let err = store.create("title only", "   ").await.unwrap_err();

    assert!(matches!(err, DashboardError::Invalid(_)));
    assert_eq!(err.to_string(), NOTE_CONTENT_REQUIRED);
    assert_eq!(service.hits(Route::CreateNote), 0);
}

#[tokio::test]
async fn created_note_is_listed_with_server_id() {
    let service = MockService::spawn().await.expect("spawn mock");
    let store = NoteStore::new(client_for(&service));

    store.create("", "remember the milk").await.unwrap();

    let notes = store.list_all().await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "");
    assert_eq!(notes[0].content, "remember the milk");
}

#[tokio::test]
async fn update_replaces_title_and_content() {
    let service = MockService::seeded().await.expect("spawn mock");
    let store = NoteStore::new(client_for(&service));
    let id = store.list_all().await.unwrap()[0].id.clone();

    store.update(&id, "Renamed", "new body").await.unwrap();

    let notes = store.list_all().await.unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].id, id);
    assert_eq!(notes[0].title, "Renamed");
    assert_eq!(notes[0].content, "new body");
    assert_eq!(service.hits(Route::UpdateNote), 1);
}

#[tokio::test]
async fn delete_removes_note_and_unknown_id_is_not_found() {
    let service = MockService::seeded().await.expect("spawn mock");
    let store = NoteStore::new(client_for(&service));
    let id = store.list_all().await.unwrap()[0].id.clone();

    store.delete(&id).await.unwrap();
    assert!(store.list_all().await.unwrap().is_empty());

    let err = store.delete(&id).await.unwrap_err();
    assert_eq!(err.remote().map(|e| e.status()), Some(404));
    assert!(err.to_string().starts_with("Failed to delete note: "));
}

#[tokio::test]
async fn zero_padded_id_is_sent_as_typed() {
    let service = MockService::seeded().await.expect("spawn mock");
    let store = NoteStore::new(client_for(&service));
    let welcome = store.list_all().await.unwrap()[0].id.clone();
    assert_eq!(welcome, ItemId::Number(4));

    let padded: ItemId = "004".parse().unwrap();
    let err = store.delete(&padded).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to delete note: note 004 not found");
    assert_eq!(store.list_all().await.unwrap().len(), 1);
}
