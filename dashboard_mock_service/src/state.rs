use dashboard_protocol::{ItemId, LaunchItem, NewLaunchItem, Note, NoteDraft};
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

/// One row of the HTTP contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    ListLaunchItems,
    CreateLaunchItem,
    TriggerLaunchItem,
    ListNotes,
    CreateNote,
    UpdateNote,
    DeleteNote,
}

/// A canned failure returned instead of running the route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// Non-2xx status with a `{"message": ...}` body, or an empty body when `None`.
    Status { status: u16, message: Option<String> },
    /// Non-2xx status with the body sent verbatim.
    RawBody { status: u16, body: String },
}

/// What a handler should do before touching the collections.
#[derive(Debug, Default)]
pub(crate) struct Admission {
    pub delay: Option<Duration>,
    pub fault: Option<Fault>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    launch_items: Vec<LaunchItem>,
    notes: Vec<Note>,
    launched: Vec<ItemId>,

    faults: HashMap<Route, VecDeque<Fault>>,
    delays: HashMap<Route, Duration>,
    hits: HashMap<Route, usize>,
}

impl Inner {
    fn assign_id(&mut self) -> ItemId {
        self.next_id += 1;
        ItemId::Number(self.next_id)
    }
}

#[derive(Default)]
pub struct ServiceState {
    inner: Mutex<Inner>,
}

impl ServiceState {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Poisoning only means a handler panicked; the collections are still consistent.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Counts the hit and pops the next queued fault for `route`.
    pub(crate) fn admit(&self, route: Route) -> Admission {
        let mut inner = self.lock();
        *inner.hits.entry(route).or_default() += 1;
        Admission {
            delay: inner.delays.get(&route).copied(),
            fault: inner.faults.get_mut(&route).and_then(VecDeque::pop_front),
        }
    }

    pub fn push_fault(&self, route: Route, fault: Fault) {
        self.lock().faults.entry(route).or_default().push_back(fault);
    }

    pub fn set_delay(&self, route: Route, delay: Option<Duration>) {
        let mut inner = self.lock();
        match delay {
            Some(d) => inner.delays.insert(route, d),
            None => inner.delays.remove(&route),
        };
    }

    pub fn hits(&self, route: Route) -> usize {
        self.lock().hits.get(&route).copied().unwrap_or(0)
    }

    pub fn launched(&self) -> Vec<ItemId> {
        self.lock().launched.clone()
    }

    pub fn launch_items(&self) -> Vec<LaunchItem> {
        self.lock().launch_items.clone()
    }

    pub fn notes(&self) -> Vec<Note> {
        self.lock().notes.clone()
    }

    pub fn insert_launch_item(&self, item: NewLaunchItem) -> LaunchItem {
        let mut inner = self.lock();
        let created = LaunchItem {
            id: inner.assign_id(),
            name: item.name,
            path: item.path,
        };
        inner.launch_items.push(created.clone());
        created
    }

    /// Records a launch. Returns false when the id is unknown.
    pub fn trigger(&self, id: &ItemId) -> bool {
        let mut inner = self.lock();
        if !inner.launch_items.iter().any(|i| &i.id == id) {
            return false;
        }
        inner.launched.push(id.clone());
        true
    }

    pub fn insert_note(&self, draft: NoteDraft) -> Note {
        let mut inner = self.lock();
        let created = Note {
            id: inner.assign_id(),
            title: draft.title,
            content: draft.content,
        };
        inner.notes.push(created.clone());
        created
    }

    pub fn update_note(&self, id: &ItemId, draft: NoteDraft) -> Option<Note> {
        let mut inner = self.lock();
        let note = inner.notes.iter_mut().find(|n| &n.id == id)?;
        note.title = draft.title;
        note.content = draft.content;
        Some(note.clone())
    }

    pub fn remove_note(&self, id: &ItemId) -> bool {
        let mut inner = self.lock();
        let before = inner.notes.len();
        inner.notes.retain(|n| &n.id != id);
        inner.notes.len() != before
    }

    /// The launchers and welcome note the dashboard shipped with.
    pub fn seed_defaults(&self) {
        for (name, path) in [
            ("VSCode", "/Applications/Visual Studio Code.app"),
            ("Chrome", "/Applications/Google Chrome.app"),
            ("Terminal", "/System/Applications/Utilities/Terminal.app"),
        ] {
            self.insert_launch_item(NewLaunchItem {
                name: name.to_string(),
                path: path.to_string(),
            });
        }
        self.insert_note(NoteDraft::new("Welcome", "This is your first note!"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_across_collections() {
        let state = ServiceState::new();
        state.seed_defaults();
        let mut ids: Vec<ItemId> = state.launch_items().into_iter().map(|i| i.id).collect();
        ids.extend(state.notes().into_iter().map(|n| n.id));
        let total = ids.len();
        ids.sort_by_key(|id| id.to_string());
        ids.dedup();
        assert_eq!(ids.len(), total);
        assert_eq!(total, 4);
    }

    #[test]
    fn faults_are_consumed_in_order_and_hits_counted() {
        let state = ServiceState::new();
        state.push_fault(
            Route::DeleteNote,
            Fault::Status {
                status: 500,
                message: Some("db locked".into()),
            },
        );
        state.push_fault(
            Route::DeleteNote,
            Fault::RawBody {
                status: 502,
                body: "<html>".into(),
            },
        );

        assert!(matches!(
            state.admit(Route::DeleteNote).fault,
            Some(Fault::Status { status: 500, .. })
        ));
        assert!(matches!(
            state.admit(Route::DeleteNote).fault,
            Some(Fault::RawBody { status: 502, .. })
        ));
        assert!(state.admit(Route::DeleteNote).fault.is_none());
        assert_eq!(state.hits(Route::DeleteNote), 3);
        assert_eq!(state.hits(Route::ListNotes), 0);
    }

    #[test]
    fn trigger_and_remove_report_unknown_ids() {
        let state = ServiceState::new();
        let item = state.insert_launch_item(NewLaunchItem {
            name: "Chrome".into(),
            path: "/Applications/Google Chrome.app".into(),
        });
        assert!(state.trigger(&item.id));
        assert!(!state.trigger(&ItemId::Number(999)));
        assert_eq!(state.launched(), vec![item.id]);
        assert!(!state.remove_note(&ItemId::Number(999)));
    }

    #[test]
    fn delay_can_be_cleared() {
        let state = ServiceState::new();
        state.set_delay(Route::ListNotes, Some(Duration::from_millis(50)));
        assert_eq!(state.admit(Route::ListNotes).delay, Some(Duration::from_millis(50)));
        state.set_delay(Route::ListNotes, None);
        assert!(state.admit(Route::ListNotes).delay.is_none());
    }
}
