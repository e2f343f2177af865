// author: kodeholic (powered by Claude)
//
// room_init 조회 — URL 의 short id → 실제 room id
//
// GET {room_init_url}?id={short_id}
//   200 → { "data": { "room_id": 5440, ... } }
//   그 외 상태코드 / 파싱 실패 → LiveError::Network (재시도 없음)

use reqwest::StatusCode;
use tracing::{info, warn};

use crate::config;
use crate::error::{LiveError, LiveResult};
use crate::protocol::message::RoomInitResponse;

pub async fn resolve_room_id(
    http:     &reqwest::Client,
    url:      &str,
    short_id: &str,
) -> LiveResult<u64> {
    let res = http
        .get(url)
        .query(&[("id", short_id)])
        .timeout(tokio::time::Duration::from_millis(config::ROOM_INIT_TIMEOUT_MS))
        .send()
        .await?;

    if res.status() != StatusCode::OK {
        warn!("[room] room_init HTTP {} (short_id={})", res.status(), short_id);
        return Err(LiveError::Network(format!("room_init returned HTTP {}", res.status())));
    }

    let body: RoomInitResponse = res.json().await?;
    info!("[room] short_id={} -> room_id={}", short_id, body.data.room_id);
    Ok(body.data.room_id)
}
