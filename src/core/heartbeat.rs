// author: kodeholic (powered by Claude)
// 하트비트 코디네이터
//
// 송신 트리거 2가지:
//   1. 주기 타이머 — Authenticated 이후 HEARTBEAT_INTERVAL_MS 마다
//   2. 서버 RECV_HEARTBEAT 수신 시 즉시 응답 (dispatch.rs 에서 호출)
// 둘 다 FrameWriter 를 통해서만 송신 (연결 생명주기는 소유하지 않음)

use tracing::{info, trace, warn};

use crate::core::writer::FrameWriter;
use crate::error::LiveResult;
use crate::protocol::message::HeartbeatPayload;
use crate::protocol::opcode::client;
use crate::protocol::packet;

/// SEND_HEARTBEAT 프레임 1개 송신
pub async fn send_heartbeat(writer: &FrameWriter) -> LiveResult<()> {
    let frame = packet::encode(&HeartbeatPayload::default(), client::SEND_HEARTBEAT)?;
    writer.send_frame(frame).await
}

/// 주기 하트비트 태스크. 연결 종료 시 LiveClient 가 abort
pub async fn run_heartbeat(writer: FrameWriter, interval_ms: u64) {
    let interval  = tokio::time::Duration::from_millis(interval_ms.max(1));
    let mut timer = tokio::time::interval(interval);
    timer.tick().await; // 첫 틱 skip (AUTH 직후 즉시 송신 방지)

    info!("[heartbeat] Started (interval={}ms)", interval_ms);

    loop {
        timer.tick().await;

        // 송신 경로가 닫혔으면 재시도 없이 종료
        if let Err(e) = send_heartbeat(&writer).await {
            warn!("[heartbeat] stopped: {}", e);
            break;
        }
        trace!("[heartbeat] sent");
    }
}
