pub mod actor;
pub mod config;
pub mod error;
pub mod launch_store;
pub mod note_store;
pub mod protocol;
pub mod remote;
pub mod view_state;
