mod rest;
mod memory;

use async_trait::async_trait;

use api::response::{ConnectionRecord, SessionRecord};

use crate::result::Result;

pub use self::rest::HttpSource;
pub use self::memory::MemorySource;

/// Where snapshots come from. The reconciliation code only ever sees the
/// decoded records, so any transport (or none) can sit behind this.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch_session(&self, session_id: &str) -> Result<SessionRecord>;
    async fn fetch_sessions(&self) -> Result<Vec<SessionRecord>>;
    async fn fetch_connection(
        &self,
        session_id: &str,
        connection_id: &str,
    ) -> Result<ConnectionRecord>;
}
