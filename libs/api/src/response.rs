use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SessionList {
    #[serde(default)]
    pub number_of_elements: u64,
    #[serde(default)]
    pub content: Vec<SessionRecord>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub session_id: String,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub media_mode: Option<String>,
    #[serde(default)]
    pub recording_mode: Option<String>,
    #[serde(default)]
    pub custom_session_id: Option<String>,
    #[serde(default)]
    pub recording: Option<bool>,
    /// `None` when the snapshot says nothing about connections,
    /// which is not the same as an empty list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connections: Option<ConnectionList>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionList {
    #[serde(default)]
    pub number_of_elements: u64,
    #[serde(default)]
    pub content: Vec<ConnectionRecord>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRecord {
    pub connection_id: String,
    #[serde(default)]
    pub status: Option<ConnectionStatus>,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub active_at: Option<i64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub client_data: Option<String>,
    #[serde(default)]
    pub server_data: Option<String>,
    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub r#type: Option<ConnectionType>,
    #[serde(default)]
    pub record: Option<bool>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub kurento_options: Option<Value>,
    #[serde(default)]
    pub rtsp_uri: Option<String>,
    #[serde(default)]
    pub adaptative_bitrate: Option<bool>,
    #[serde(default)]
    pub only_play_with_subscribers: Option<bool>,
    #[serde(default)]
    pub network_cache: Option<i64>,

    // absent and null both decode to None: "leave the mirror alone"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publishers: Option<Vec<PublisherRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscribers: Option<Vec<SubscriberRecord>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PublisherRecord {
    pub stream_id: String,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub has_audio: Option<bool>,
    #[serde(default)]
    pub has_video: Option<bool>,
    #[serde(default)]
    pub audio_active: Option<bool>,
    #[serde(default)]
    pub video_active: Option<bool>,
    #[serde(default)]
    pub frame_rate: Option<f64>,
    #[serde(default)]
    pub type_of_video: Option<String>,
    /// Encoded as `"WIDTHxHEIGHT"`, e.g. `"640x480"`
    #[serde(default)]
    pub video_dimensions: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberRecord {
    pub stream_id: String,
    #[serde(default)]
    pub created_at: Option<i64>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    /// Token issued, nobody has used it yet
    Pending,
    /// Token consumed by a participant
    Active,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConnectionType {
    #[serde(rename = "WEBRTC")]
    WebRtc,
    #[serde(rename = "IPCAM")]
    IpCam,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Subscriber,
    Publisher,
    Moderator,
    #[serde(other)]
    Unknown,
}
