// author: kodeholic (powered by Claude)
// FrameWriter — 소켓 송신 경로의 단일 writer
//
// 구조:
//   LiveClient (AUTH) ─┐
//   heartbeat 타이머  ─┼─ FrameWriter (mpsc) ──▶ run_writer 태스크 ──▶ WS sink
//   RECV_HEARTBEAT 응답 ┘
//
// 큐 항목 하나 = 완성된 프레임 하나 → 여러 송신자가 있어도 프레임 중간에 바이트가 섞이지 않음

use bytes::Bytes;
use futures_util::{Sink, SinkExt};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::{self, Message};
use tracing::trace;

use crate::error::{LiveError, LiveResult};

#[derive(Debug)]
pub enum Outbound {
    /// 인코딩 완료된 와이어 프레임
    Frame(Bytes),
    /// WS Close 전송 후 writer 종료
    Close,
}

#[derive(Clone)]
pub struct FrameWriter {
    tx: mpsc::Sender<Outbound>,
}

impl FrameWriter {
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<Outbound>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    pub async fn send_frame(&self, frame: Bytes) -> LiveResult<()> {
        self.tx
            .send(Outbound::Frame(frame))
            .await
            .map_err(|_| LiveError::Transport("writer closed".to_string()))
    }

    pub async fn close(&self) -> LiveResult<()> {
        self.tx
            .send(Outbound::Close)
            .await
            .map_err(|_| LiveError::Transport("writer closed".to_string()))
    }
}

/// 큐를 비우며 sink 로 송신. 송신 실패 시 에러로 종료, Close 후에는 정상 종료
pub async fn run_writer<S>(mut sink: S, mut rx: mpsc::Receiver<Outbound>) -> LiveResult<()>
where
    S: Sink<Message, Error = tungstenite::Error> + Unpin,
{
    while let Some(out) = rx.recv().await {
        match out {
            Outbound::Frame(frame) => {
                trace!("[writer] send {} bytes", frame.len());
                sink.send(Message::Binary(frame)).await?;
            }
            Outbound::Close => {
                trace!("[writer] send close");
                sink.send(Message::Close(None)).await?;
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::sink;
    use std::sync::{Arc, Mutex};

    fn recording_sink(
        log: Arc<Mutex<Vec<Message>>>,
    ) -> impl Sink<Message, Error = tungstenite::Error> + Unpin {
        Box::pin(sink::unfold(log, |log, msg: Message| async move {
            log.lock().unwrap().push(msg);
            Ok::<_, tungstenite::Error>(log)
        }))
    }

    #[tokio::test]
    async fn frames_are_written_whole_and_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let (writer, rx) = FrameWriter::channel(8);
        let task = tokio::spawn(run_writer(recording_sink(Arc::clone(&log)), rx));

        writer.send_frame(Bytes::from_static(b"first")).await.unwrap();
        writer.clone().send_frame(Bytes::from_static(b"second")).await.unwrap();
        writer.close().await.unwrap();

        task.await.unwrap().unwrap();

        let log = log.lock().unwrap();
        assert_eq!(log.len(), 3);
        assert_eq!(log[0], Message::Binary(Bytes::from_static(b"first")));
        assert_eq!(log[1], Message::Binary(Bytes::from_static(b"second")));
        assert!(matches!(log[2], Message::Close(None)));
    }

    #[tokio::test]
    async fn send_after_writer_exit_is_transport_error() {
        let (writer, rx) = FrameWriter::channel(1);
        drop(rx);

        match writer.send_frame(Bytes::from_static(b"x")).await {
            Err(LiveError::Transport(_)) => {}
            other => panic!("expected Transport error, got {:?}", other),
        }
    }
}
