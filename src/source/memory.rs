use std::sync::RwLock;

use async_trait::async_trait;
use indexmap::IndexMap;

use api::response::{ConnectionRecord, SessionRecord};

use super::SnapshotSource;
use crate::error::Error;
use crate::result::Result;

/// Snapshots held in memory. Whatever was last put is what gets fetched.
#[derive(Default)]
pub struct MemorySource {
    sessions: RwLock<IndexMap<String, SessionRecord>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_session(&self, record: SessionRecord) {
        if let Ok(mut sessions) = self.sessions.write() {
            sessions.insert(record.session_id.clone(), record);
        }
    }

    pub fn remove_session(&self, session_id: &str) -> Option<SessionRecord> {
        self.sessions
            .write()
            .ok()
            .and_then(|mut sessions| sessions.shift_remove(session_id))
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, IndexMap<String, SessionRecord>>> {
        self.sessions
            .read()
            .map_err(|e| Error::Request(anyhow::anyhow!("memory source poisoned: {}", e)))
    }
}

#[async_trait]
impl SnapshotSource for MemorySource {
    async fn fetch_session(&self, session_id: &str) -> Result<SessionRecord> {
        self.read()?.get(session_id).cloned().ok_or(Error::NotFound)
    }

    async fn fetch_sessions(&self) -> Result<Vec<SessionRecord>> {
        Ok(self.read()?.values().cloned().collect())
    }

    async fn fetch_connection(
        &self,
        session_id: &str,
        connection_id: &str,
    ) -> Result<ConnectionRecord> {
        self.read()?
            .get(session_id)
            .and_then(|session| session.connections.as_ref())
            .and_then(|connections| {
                connections
                    .content
                    .iter()
                    .find(|c| c.connection_id == connection_id)
                    .cloned()
            })
            .ok_or(Error::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session() -> SessionRecord {
        serde_json::from_value(json!({
            "sessionId": "ses_A",
            "connections": {
                "numberOfElements": 1,
                "content": [{ "connectionId": "con_A" }],
            },
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_memory_source_fetch() {
        let source = MemorySource::new();
        source.put_session(session());

        let record = source.fetch_session("ses_A").await.unwrap();
        assert_eq!("ses_A", record.session_id);

        let connection = source.fetch_connection("ses_A", "con_A").await.unwrap();
        assert_eq!("con_A", connection.connection_id);

        assert!(source
            .fetch_connection("ses_A", "con_B")
            .await
            .unwrap_err()
            .is_not_found());
        assert_eq!(1, source.fetch_sessions().await.unwrap().len());
    }

    #[tokio::test]
    async fn test_memory_source_remove() {
        let source = MemorySource::new();
        source.put_session(session());

        assert!(source.remove_session("ses_A").is_some());
        assert!(source.fetch_session("ses_A").await.unwrap_err().is_not_found());
        assert!(source.fetch_sessions().await.unwrap().is_empty());
    }
}
