mod modules;

pub use modules::{actor, config, error, launch_store, note_store, protocol, remote, view_state};
