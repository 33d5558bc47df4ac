use indexmap::IndexMap;
use tracing::debug;

use api::request::ConnectionPropertiesPatch;
use api::response::{ConnectionRecord, SessionRecord};

use crate::connection::Connection;
use crate::merge::{merge_by_key, MergeStats};

/// Result of reconciling a [`Session`] against a snapshot.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionUpdate {
    pub changed: bool,
    pub stats: MergeStats,
}

/// Local copy of one remote session and the connections it holds.
#[derive(Debug, Clone)]
pub struct Session {
    pub session_id: String,
    pub created_at: Option<i64>,
    pub media_mode: Option<String>,
    pub recording_mode: Option<String>,
    pub custom_session_id: Option<String>,
    pub recording: Option<bool>,

    connections: IndexMap<String, Connection>,
}

impl Session {
    pub fn new(record: SessionRecord) -> Self {
        let mut session = Self {
            session_id: String::new(),
            created_at: None,
            media_mode: None,
            recording_mode: None,
            custom_session_id: None,
            recording: None,
            connections: IndexMap::new(),
        };
        session.reset_with_record(record);
        session
    }

    pub fn reset_with_record(&mut self, record: SessionRecord) -> SessionUpdate {
        let mut changed = !(self.session_id == record.session_id
            && self.created_at == record.created_at
            && self.media_mode == record.media_mode
            && self.recording_mode == record.recording_mode
            && self.custom_session_id == record.custom_session_id
            && self.recording == record.recording);

        self.session_id = record.session_id;
        self.created_at = record.created_at;
        self.media_mode = record.media_mode;
        self.recording_mode = record.recording_mode;
        self.custom_session_id = record.custom_session_id;
        self.recording = record.recording;

        let mut stats = MergeStats::default();
        if let Some(connections) = record.connections {
            let mut touched = false;
            stats = merge_by_key(
                &mut self.connections,
                connections.content,
                |c| c.connection_id.clone(),
                Connection::new,
                |connection, c| touched |= reconcile(connection, c),
            );
            changed |= touched || stats.membership_changed();
            debug!(session = %self.session_id, ?stats, changed, "connections merged");
        }

        SessionUpdate { changed, stats }
    }

    /// Reconcile a single connection fetched on its own. Returns whether the
    /// mirror changed; an unknown connection is added.
    pub fn reset_connection(&mut self, record: ConnectionRecord) -> bool {
        match self.connections.get_mut(&record.connection_id) {
            Some(connection) => reconcile(connection, record),
            None => {
                let connection = Connection::new(record);
                self.connections
                    .insert(connection.connection_id.clone(), connection);
                debug!(session = %self.session_id, "connection added");
                true
            }
        }
    }

    /// Apply a properties patch to one connection, `false` if it is unknown.
    pub fn update_connection(
        &mut self,
        connection_id: &str,
        patch: &ConnectionPropertiesPatch,
    ) -> bool {
        match self.connections.get_mut(connection_id) {
            Some(connection) => {
                connection.override_properties(patch);
                true
            }
            None => false,
        }
    }

    pub fn remove_connection(&mut self, connection_id: &str) -> bool {
        self.connections.shift_remove(connection_id).is_some()
    }

    pub fn connection(&self, connection_id: &str) -> Option<&Connection> {
        self.connections.get(connection_id)
    }

    pub fn connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values()
    }

    pub fn active_connections(&self) -> impl Iterator<Item = &Connection> {
        self.connections.values().filter(|c| c.is_active())
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}

fn reconcile(connection: &mut Connection, record: ConnectionRecord) -> bool {
    let before = connection.clone();
    connection.reset_with_record(record);
    *connection != before
}

/// Every session the caller knows about, keyed by session id.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    sessions: IndexMap<String, Session>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconcile against the full list of sessions. Returns `true` when a
    /// session appeared, disappeared or changed.
    pub fn reconcile(&mut self, records: Vec<SessionRecord>) -> bool {
        let mut touched = false;
        let stats = merge_by_key(
            &mut self.sessions,
            records,
            |s| s.session_id.clone(),
            Session::new,
            |session, s| touched |= session.reset_with_record(s).changed,
        );
        debug!(?stats, touched, "sessions merged");
        touched || stats.membership_changed()
    }

    pub fn session(&self, session_id: &str) -> Option<&Session> {
        self.sessions.get(session_id)
    }

    pub fn session_mut(&mut self, session_id: &str) -> Option<&mut Session> {
        self.sessions.get_mut(session_id)
    }

    pub fn sessions(&self) -> impl Iterator<Item = &Session> {
        self.sessions.values()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
