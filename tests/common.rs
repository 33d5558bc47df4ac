#![allow(dead_code)]

use api::response::SessionRecord;
use serde_json::{json, Value};

pub fn session_json(session_id: &str) -> Value {
    json!({
        "sessionId": session_id,
        "createdAt": 1700000000000i64,
        "mediaMode": "ROUTED",
        "recordingMode": "MANUAL",
        "recording": false,
        "connections": {
            "numberOfElements": 2,
            "content": [
                {
                    "connectionId": "con_ALICE",
                    "status": "active",
                    "createdAt": 1700000000100i64,
                    "activeAt": 1700000000200i64,
                    "platform": "Chrome 120.0 on Linux 64-bit",
                    "token": format!("wss://localhost:4443?sessionId={}&token=tok_ALICE", session_id),
                    "type": "WEBRTC",
                    "role": "PUBLISHER",
                    "record": true,
                    "publishers": [{
                        "streamId": "str_CAM_ALICE",
                        "hasAudio": true,
                        "hasVideo": true,
                        "audioActive": true,
                        "videoActive": true,
                        "frameRate": 30,
                        "typeOfVideo": "CAMERA",
                        "videoDimensions": "640x480",
                    }],
                    "subscribers": [{ "streamId": "str_CAM_BOB" }],
                },
                {
                    "connectionId": "con_BOB",
                    "status": "active",
                    "type": "WEBRTC",
                    "role": "PUBLISHER",
                    "publishers": [{ "streamId": "str_CAM_BOB", "hasAudio": true }],
                    "subscribers": [{ "streamId": "str_CAM_ALICE" }],
                },
            ],
        },
    })
}

pub fn session_record(value: Value) -> SessionRecord {
    serde_json::from_value(value).unwrap()
}
