// author: kodeholic (powered by Claude)
//
// 프레임 디스패처 — operation 기준 라우팅
//
//   POPULARITY     → body 앞 4바이트 big-endian u32 → hooks.on_popularity
//   COMMAND        → body JSON 파싱 → command::process_command
//   RECV_HEARTBEAT → 즉시 SEND_HEARTBEAT 응답
//   SEND_HEARTBEAT / AUTH (송신 전용) 및 미정의 opcode → no-op

use tracing::{trace, warn};

use crate::core::heartbeat;
use crate::core::writer::FrameWriter;
use crate::error::{LiveError, LiveResult};
use crate::hooks::LiveHooks;
use crate::protocol::command::process_command;
use crate::protocol::opcode::{client, op_name, server};
use crate::protocol::packet::Frame;

/// 에러는 송신 경로 단절(Transport)만 반환. 본문 해석 실패는 경고 후 skip
pub async fn dispatch_frame(
    frame:  &Frame,
    hooks:  &dyn LiveHooks,
    writer: &FrameWriter,
) -> LiveResult<()> {
    let op = frame.operation();
    trace!("[dispatch] op={} ({}) body={}B", op, op_name(op), frame.body.len());

    match op {
        server::POPULARITY => match parse_popularity(frame) {
            Some(value) => hooks.on_popularity(value),
            None => warn!("[dispatch] POPULARITY body too short ({}B)", frame.body.len()),
        },
        server::COMMAND => match serde_json::from_slice(&frame.body) {
            Ok(value) => {
                process_command(value, hooks);
            }
            Err(e) => warn!("[dispatch] {}", LiveError::from(e)),
        },
        server::RECV_HEARTBEAT => heartbeat::send_heartbeat(writer).await?,
        client::SEND_HEARTBEAT | client::AUTH => {}
        _ => {}
    }
    Ok(())
}

/// body 앞 4바이트. 4바이트 미만이면 None
pub fn parse_popularity(frame: &Frame) -> Option<u32> {
    let bytes: [u8; 4] = frame.body.get(..4)?.try_into().ok()?;
    Some(u32::from_be_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::writer::Outbound;
    use crate::protocol::packet::{decode, encode, encode_raw};
    use bytes::Bytes;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        popularity: Mutex<Vec<u32>>,
        danmaku:    Mutex<Vec<String>>,
    }

    impl LiveHooks for Recorder {
        fn on_popularity(&self, popularity: u32) {
            self.popularity.lock().unwrap().push(popularity);
        }

        fn on_danmaku(&self, content: &str, _username: &str) {
            self.danmaku.lock().unwrap().push(content.to_string());
        }
    }

    fn single(bytes: Bytes) -> Frame {
        decode(&bytes).remove(0)
    }

    #[tokio::test]
    async fn popularity_is_big_endian_u32() {
        let rec = Recorder::default();
        let (writer, _rx) = FrameWriter::channel(1);

        let frame = single(encode_raw(&[0x00, 0x00, 0x00, 0x64], server::POPULARITY));
        dispatch_frame(&frame, &rec, &writer).await.unwrap();

        assert_eq!(*rec.popularity.lock().unwrap(), vec![100]);
    }

    #[tokio::test]
    async fn short_popularity_body_is_skipped() {
        let rec = Recorder::default();
        let (writer, _rx) = FrameWriter::channel(1);

        let frame = single(encode_raw(&[0x01, 0x02], server::POPULARITY));
        dispatch_frame(&frame, &rec, &writer).await.unwrap();

        assert!(rec.popularity.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn command_frame_reaches_processor() {
        let rec = Recorder::default();
        let (writer, _rx) = FrameWriter::channel(1);

        let body = json!([
            { "cmd": "DANMU_MSG", "info": [0, "hi", [1, "bob"]] },
            { "cmd": "FOO_BAR" },
            { "cmd": "DANMU_MSG", "info": [0, "there", [1, "bob"]] },
        ]);
        let frame = single(encode(&body, server::COMMAND).unwrap());
        dispatch_frame(&frame, &rec, &writer).await.unwrap();

        assert_eq!(*rec.danmaku.lock().unwrap(), vec!["hi", "there"]);
    }

    #[tokio::test]
    async fn malformed_command_json_is_not_fatal() {
        let rec = Recorder::default();
        let (writer, _rx) = FrameWriter::channel(1);

        let frame = single(encode_raw(b"{not json", server::COMMAND));
        assert!(dispatch_frame(&frame, &rec, &writer).await.is_ok());
    }

    #[tokio::test]
    async fn recv_heartbeat_triggers_reply() {
        let rec = Recorder::default();
        let (writer, mut rx) = FrameWriter::channel(1);

        let frame = single(encode_raw(&[], server::RECV_HEARTBEAT));
        dispatch_frame(&frame, &rec, &writer).await.unwrap();

        let Some(Outbound::Frame(bytes)) = rx.recv().await else {
            panic!("expected heartbeat reply");
        };
        assert_eq!(decode(&bytes)[0].operation(), client::SEND_HEARTBEAT);
    }

    #[tokio::test]
    async fn recv_heartbeat_without_writer_is_transport_error() {
        let rec = Recorder::default();
        let (writer, rx) = FrameWriter::channel(1);
        drop(rx);

        let frame = single(encode_raw(&[], server::RECV_HEARTBEAT));
        assert!(matches!(
            dispatch_frame(&frame, &rec, &writer).await,
            Err(LiveError::Transport(_)),
        ));
    }

    #[tokio::test]
    async fn outbound_and_unknown_ops_are_ignored() {
        let rec = Recorder::default();
        let (writer, mut rx) = FrameWriter::channel(4);

        for op in [client::AUTH, client::SEND_HEARTBEAT, 42] {
            let frame = single(encode(&json!({}), op).unwrap());
            dispatch_frame(&frame, &rec, &writer).await.unwrap();
        }

        assert!(rx.try_recv().is_err());
        assert!(rec.popularity.lock().unwrap().is_empty());
        assert!(rec.danmaku.lock().unwrap().is_empty());
    }
}
