use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::error::Error;
use crate::result::Result;
use crate::session::{Registry, Session};
use crate::source::SnapshotSource;

/// Keeps one [`Session`] mirror in sync with a [`SnapshotSource`].
pub struct Watcher {
    session_id: String,
    source: Arc<dyn SnapshotSource>,
    session: Option<Session>,
}

impl Watcher {
    pub fn new(session_id: String, source: Arc<dyn SnapshotSource>) -> Self {
        Self {
            session_id,
            source,
            session: None,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The mirror, `None` until the first successful fetch or after the
    /// session was reported gone.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Fetch the session and reconcile the mirror. Returns whether anything
    /// changed. When the session no longer exists the mirror is dropped and
    /// [`Error::NotFound`] is returned.
    pub async fn fetch(&mut self) -> Result<bool> {
        match self.source.fetch_session(&self.session_id).await {
            Ok(record) => Ok(match self.session.as_mut() {
                Some(session) => session.reset_with_record(record).changed,
                None => {
                    self.session = Some(Session::new(record));
                    true
                }
            }),
            Err(Error::NotFound) => {
                if self.session.take().is_some() {
                    info!(session = %self.session_id, "session closed");
                }
                Err(Error::NotFound)
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch one connection and reconcile it into the mirror. Without a
    /// mirror yet this falls back to a full [`Watcher::fetch`].
    pub async fn fetch_connection(&mut self, connection_id: &str) -> Result<bool> {
        if self.session.is_none() {
            return self.fetch().await;
        }
        let result = self
            .source
            .fetch_connection(&self.session_id, connection_id)
            .await;
        let Some(session) = self.session.as_mut() else {
            return Err(Error::NotFound);
        };
        match result {
            Ok(record) => Ok(session.reset_connection(record)),
            Err(Error::NotFound) => {
                if session.remove_connection(connection_id) {
                    info!(
                        session = %self.session_id,
                        connection = connection_id,
                        "connection closed"
                    );
                }
                Err(Error::NotFound)
            }
            Err(e) => Err(e),
        }
    }

    /// Poll every `tick` until `signal` resolves. A copy of the mirror is
    /// sent on `changes` each time a fetch reports a change.
    pub async fn watch<F>(
        mut self,
        tick: Duration,
        changes: Option<mpsc::Sender<Session>>,
        signal: F,
    ) -> Self
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(signal);
        loop {
            match self.fetch().await {
                Ok(true) => {
                    let connections = self.session.as_ref().map_or(0, Session::connection_count);
                    info!(session = %self.session_id, connections, "session changed");
                    if let (Some(tx), Some(session)) = (&changes, &self.session) {
                        if tx.send(session.clone()).await.is_err() {
                            debug!(session = %self.session_id, "change receiver dropped");
                        }
                    }
                }
                Ok(false) => debug!(session = %self.session_id, "session unchanged"),
                Err(Error::NotFound) => warn!(session = %self.session_id, "session not found"),
                Err(e) => error!(session = %self.session_id, "fetch error: {}", e),
            }

            tokio::select! {
                _ = &mut signal => break,
                _ = tokio::time::sleep(tick) => {}
            }
        }
        self
    }
}

/// Reconcile `registry` against every session the source knows about.
pub async fn sync_registry(
    registry: &mut Registry,
    source: &dyn SnapshotSource,
) -> Result<bool> {
    let records = source.fetch_sessions().await?;
    let changed = registry.reconcile(records);
    debug!(sessions = registry.len(), changed, "registry synced");
    Ok(changed)
}
