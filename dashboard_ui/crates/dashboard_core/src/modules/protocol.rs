pub use dashboard_protocol::{ErrorBody, ItemId, LaunchItem, NewLaunchItem, Note, NoteDraft};
