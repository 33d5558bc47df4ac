pub mod config;
pub mod connection;
pub mod error;
pub mod log;
pub mod merge;
pub mod publisher;
pub mod result;
pub mod session;
pub mod source;
pub mod watcher;

pub use connection::{Connection, ConnectionProperties};
pub use publisher::Publisher;
pub use session::{Registry, Session, SessionUpdate};
pub use source::{HttpSource, MemorySource, SnapshotSource};
pub use watcher::Watcher;
