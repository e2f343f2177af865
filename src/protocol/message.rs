// author: kodeholic (powered by Claude)

use serde::{Deserialize, Serialize};

use crate::config;

// ----------------------------------------------------------------------------
// [C→S] 클라이언트 송신 payload 타입들
// ----------------------------------------------------------------------------

/// op: AUTH (7)
///
/// 예시:
///   { "uid": 0, "roomid": 5440, "protover": 1, "platform": "web", "clientver": "1.4.0" }
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct AuthPayload {
    pub uid:       u64,
    pub roomid:    u64,
    pub protover:  u32,
    pub platform:  String,
    pub clientver: String,
}

impl AuthPayload {
    pub fn new(uid: u64, roomid: u64) -> Self {
        Self {
            uid,
            roomid,
            protover:  config::AUTH_PROTOVER,
            platform:  config::AUTH_PLATFORM.to_string(),
            clientver: config::AUTH_CLIENTVER.to_string(),
        }
    }
}

/// op: SEND_HEARTBEAT (2) — 빈 JSON 객체 `{}`
#[derive(Serialize, Debug, Default)]
pub struct HeartbeatPayload {}

// ----------------------------------------------------------------------------
// [HTTP] room_init 응답
// ----------------------------------------------------------------------------

/// `{ "code": 0, "data": { "room_id": 5440, ... } }` 에서 필요한 부분만
#[derive(Deserialize, Debug)]
pub struct RoomInitResponse {
    pub data: RoomInitData,
}

#[derive(Deserialize, Debug)]
pub struct RoomInitData {
    pub room_id: u64,
}
