pub mod backend;
pub mod dispatcher;

pub use backend::{ClipboardBackend, ClipboardTool};
pub use dispatcher::{ClipboardDispatcher, PathResolver, ProcessSpawner, Spawner, ToolResolver};
