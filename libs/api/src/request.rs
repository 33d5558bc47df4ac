use serde::{Deserialize, Serialize};

use crate::response::Role;

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct QuerySession {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_connections: Option<bool>,
}

impl QuerySession {
    pub fn with_pending() -> Self {
        Self {
            pending_connections: Some(true),
        }
    }
}

/// Partial update of a connection's properties.
///
/// Only `record` and `role` can be changed on a live connection,
/// a `None` field means "keep the current value".
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionPropertiesPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}
