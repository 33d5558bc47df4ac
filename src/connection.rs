use indexmap::{IndexMap, IndexSet};
use serde_json::Value;
use tracing::{trace, warn};

use api::request::ConnectionPropertiesPatch;
use api::response::{ConnectionRecord, ConnectionStatus, ConnectionType, Role};

use crate::merge::{merge_by_key, merge_ids, MergeStats};
use crate::publisher::Publisher;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionProperties {
    pub kind: Option<ConnectionType>,
    /// Server side data attached when the connection was created
    pub data: Option<String>,
    pub record: Option<bool>,
    pub role: Option<Role>,
    /// Opaque media server options, compared structurally
    pub kurento_options: Option<Value>,
    pub rtsp_uri: Option<String>,
    pub adaptative_bitrate: Option<bool>,
    pub only_play_with_subscribers: Option<bool>,
    pub network_cache: Option<i64>,
}

impl ConnectionProperties {
    fn reset_with_record(&mut self, record: &mut ConnectionRecord) {
        self.kind = record.r#type;
        self.data = record.server_data.take();
        self.record = record.record;
        self.role = record.role;
        self.kurento_options = record.kurento_options.take();
        self.rtsp_uri = record.rtsp_uri.take();
        self.adaptative_bitrate = record.adaptative_bitrate;
        self.only_play_with_subscribers = record.only_play_with_subscribers;
        self.network_cache = record.network_cache;
    }

    // everything but kurento_options
    fn scalars_eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.data == other.data
            && self.record == other.record
            && self.role == other.role
            && self.rtsp_uri == other.rtsp_uri
            && self.adaptative_bitrate == other.adaptative_bitrate
            && self.only_play_with_subscribers == other.only_play_with_subscribers
            && self.network_cache == other.network_cache
    }
}

/// Local copy of one participant's membership in a session.
#[derive(Debug, Clone)]
pub struct Connection {
    pub connection_id: String,
    pub status: Option<ConnectionStatus>,
    pub created_at: Option<i64>,
    pub active_at: Option<i64>,
    /// `"CITY, COUNTRY"` or `"unknown"`
    pub location: Option<String>,
    pub platform: Option<String>,
    pub client_data: Option<String>,
    /// Handed to the participant to join, not part of equality
    pub token: Option<String>,
    pub properties: ConnectionProperties,

    publishers: IndexMap<String, Publisher>,
    subscribers: IndexSet<String>,
}

impl Connection {
    pub fn new(record: ConnectionRecord) -> Self {
        let mut connection = Self {
            connection_id: String::new(),
            status: None,
            created_at: None,
            active_at: None,
            location: None,
            platform: None,
            client_data: None,
            token: None,
            properties: ConnectionProperties::default(),
            publishers: IndexMap::new(),
            subscribers: IndexSet::new(),
        };
        connection.reset_with_record(record);
        connection
    }

    /// Merge a fetched record into this mirror.
    ///
    /// Scalars and properties are always overwritten. `publishers` and
    /// `subscribers` are only reconciled when the record carries them: a
    /// missing list keeps the current collection, an empty one clears it.
    pub fn reset_with_record(&mut self, mut record: ConnectionRecord) -> &mut Self {
        if self.status == Some(ConnectionStatus::Active)
            && record.status == Some(ConnectionStatus::Pending)
        {
            warn!(
                connection = %record.connection_id,
                "connection status went back from active to pending"
            );
        }

        self.properties.reset_with_record(&mut record);
        self.connection_id = record.connection_id;
        self.status = record.status;
        self.created_at = record.created_at;
        self.active_at = record.active_at;
        self.location = record.location;
        self.platform = record.platform;
        self.client_data = record.client_data;
        self.token = record.token;

        if let Some(publishers) = record.publishers {
            let stats = merge_by_key(
                &mut self.publishers,
                publishers,
                |p| p.stream_id.clone(),
                Publisher::new,
                |publisher, p| {
                    publisher.reset_with_record(p);
                },
            );
            trace!(connection = %self.connection_id, ?stats, "publishers merged");
        }

        if let Some(subscribers) = record.subscribers {
            let stats = self.merge_subscribers(subscribers.into_iter().map(|s| s.stream_id));
            trace!(connection = %self.connection_id, ?stats, "subscribers merged");
        }

        self
    }

    fn merge_subscribers<I>(&mut self, ids: I) -> MergeStats
    where
        I: IntoIterator<Item = String>,
    {
        merge_ids(&mut self.subscribers, ids)
    }

    /// Apply a partial properties update. Only `record` and `role` are
    /// touched, and only when the patch has a value for them.
    pub fn override_properties(&mut self, patch: &ConnectionPropertiesPatch) {
        if let Some(record) = patch.record {
            self.properties.record = Some(record);
        }
        if let Some(role) = patch.role {
            self.properties.role = Some(role);
        }
    }

    pub fn publishers(&self) -> impl Iterator<Item = &Publisher> {
        self.publishers.values()
    }

    pub fn publisher(&self, stream_id: &str) -> Option<&Publisher> {
        self.publishers.get(stream_id)
    }

    pub fn publisher_count(&self) -> usize {
        self.publishers.len()
    }

    /// Stream ids this connection is subscribed to. Each one should name a
    /// publisher of another connection, but that is not checked.
    pub fn subscribers(&self) -> impl Iterator<Item = &str> {
        self.subscribers.iter().map(String::as_str)
    }

    pub fn is_subscribed_to(&self, stream_id: &str) -> bool {
        self.subscribers.contains(stream_id)
    }

    pub fn is_active(&self) -> bool {
        self.status == Some(ConnectionStatus::Active)
    }
}

/// Change detection between two snapshots of the same connection.
///
/// `token` is not compared. Subscribers are compared regardless of
/// order, publishers are compared by position, so the same publishers in
/// a different order are not equal.
impl PartialEq for Connection {
    fn eq(&self, other: &Self) -> bool {
        if !(self.connection_id == other.connection_id
            && self.status == other.status
            && self.created_at == other.created_at
            && self.active_at == other.active_at
            && self.location == other.location
            && self.platform == other.platform
            && self.client_data == other.client_data
            && self.properties.scalars_eq(&other.properties))
        {
            return false;
        }

        if self.publishers.len() != other.publishers.len()
            || self.subscribers.len() != other.subscribers.len()
        {
            return false;
        }

        if self.properties.kurento_options != other.properties.kurento_options {
            return false;
        }

        let mut ours: Vec<&String> = self.subscribers.iter().collect();
        let mut theirs: Vec<&String> = other.subscribers.iter().collect();
        ours.sort();
        theirs.sort();
        if ours != theirs {
            return false;
        }

        self.publishers
            .values()
            .zip(other.publishers.values())
            .all(|(a, b)| a == b)
    }
}
