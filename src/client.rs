// author: kodeholic (powered by Claude)
//
// LiveClient — 연결 관리자 (상태 머신 구동)
//
//   Disconnected ─▶ ResolvingRoom ─▶ Connected ─▶ Authenticated ─▶ Closed
//        ▲               │ (room_init 실패: 에러 반환, 상태 복귀)
//        └───────────────┘
//
// 태스크 구성 (연결 1개당):
//   [수신 루프]  start() 를 호출한 태스크. 메시지 1개를 끝까지 처리한 뒤 다음 메시지 대기
//   [writer]    WS sink 단독 소유 — FrameWriter 큐 소비
//   [heartbeat] 주기 송신 — FrameWriter clone 만 보유
// 종료 시 writer / heartbeat 를 abort → 소켓 해제는 정확히 1회

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use std::future::Future;
use std::sync::Arc;
use tokio::task::{JoinError, JoinHandle};
use tokio_tungstenite::{connect_async, tungstenite::{self, Message}};
use tracing::{debug, info, trace, warn};

use crate::config;
use crate::core::heartbeat;
use crate::core::writer::{run_writer, FrameWriter};
use crate::core::{ConnState, Session};
use crate::error::{LiveError, LiveResult};
use crate::hooks::LiveHooks;
use crate::http;
use crate::protocol::{dispatch_frame, message::AuthPayload, opcode::client, packet};

/// 로컬 종료 시 Close 프레임 flush 대기 한도
const CLOSE_FLUSH_MS: u64 = 1_000;

/// 런타임 설정. 기본값은 config.rs 상수
#[derive(Debug, Clone)]
pub struct ClientArgs {
    /// 방송 URL 의 방 번호 (short id)
    pub short_id:              String,
    /// 0 = 비로그인
    pub uid:                   u64,
    pub room_init_url:         String,
    pub websocket_url:         String,
    pub heartbeat_interval_ms: u64,
}

impl ClientArgs {
    pub fn new(short_id: impl Into<String>) -> Self {
        Self {
            short_id:              short_id.into(),
            uid:                   config::ANONYMOUS_UID,
            room_init_url:         config::ROOM_INIT_URL.to_string(),
            websocket_url:         config::WEBSOCKET_URL.to_string(),
            heartbeat_interval_ms: config::HEARTBEAT_INTERVAL_MS,
        }
    }
}

pub struct LiveClient {
    args:    ClientArgs,
    session: Session,
    hooks:   Arc<dyn LiveHooks>,
    http:    reqwest::Client,
}

impl LiveClient {
    pub fn new(args: ClientArgs, hooks: Arc<dyn LiveHooks>) -> Self {
        let session = Session::new(args.short_id.clone(), args.uid);
        Self { args, session, hooks, http: reqwest::Client::new() }
    }

    pub fn state(&self) -> ConnState {
        self.session.state()
    }

    pub fn room_id(&self) -> Option<u64> {
        self.session.room_id()
    }

    /// 원격 종료 시 Ok, 조회/전송 실패 시 Err
    pub async fn start(&mut self) -> LiveResult<()> {
        self.start_until(std::future::pending()).await
    }

    /// shutdown 이 완료되면 Close 를 보내고 정상 종료
    pub async fn start_until(&mut self, shutdown: impl Future<Output = ()>) -> LiveResult<()> {
        if self.session.state() == ConnState::Closed {
            return Err(LiveError::Transport("session already closed".to_string()));
        }

        // 1. room id 조회 (캐시되어 있으면 생략)
        let room_id = self.resolve_room().await?;
        let auth = packet::encode(&AuthPayload::new(self.session.uid, room_id), client::AUTH)?;

        // 2. 소켓 연결
        debug!("[client] connecting {}", self.args.websocket_url);
        let ws = match connect_async(self.args.websocket_url.as_str()).await {
            Ok((ws, _)) => ws,
            Err(e) => {
                self.session.advance(ConnState::Closed);
                return Err(e.into());
            }
        };
        self.session.advance(ConnState::Connected);
        info!("[client] connected room_id={}", room_id);

        let (ws_tx, mut ws_rx) = ws.split();
        let (writer, writer_rx) = FrameWriter::channel(config::EGRESS_QUEUE_SIZE);
        let mut writer_task = tokio::spawn(run_writer(ws_tx, writer_rx));

        // 3. AUTH
        if let Err(e) = writer.send_frame(auth).await {
            writer_task.abort();
            self.session.advance(ConnState::Closed);
            return Err(e);
        }
        // 큐잉 시점에 Authenticated 로 전이 (서버는 AUTH 응답 프레임을 보내지 않음).
        // 실제 송신 실패는 writer 태스크 종료로 수신 루프에서 Transport 에러가 됨
        self.session.advance(ConnState::Authenticated);
        info!("[client] AUTH queued uid={} room_id={}", self.session.uid, room_id);

        // 4. 하트비트 + 수신 루프
        let heartbeat_task = tokio::spawn(heartbeat::run_heartbeat(
            writer.clone(),
            self.args.heartbeat_interval_ms,
        ));

        let result = self.receive_loop(&mut ws_rx, &writer, &mut writer_task, shutdown).await;

        // 5. 정리
        heartbeat_task.abort();
        writer_task.abort();
        self.session.advance(ConnState::Closed);

        match &result {
            Ok(())  => info!("[client] closed room_id={} uptime={}ms", room_id, self.session.uptime_ms()),
            Err(e)  => warn!("[client] closed room_id={} by error: {}", room_id, e),
        }
        result
    }

    async fn resolve_room(&mut self) -> LiveResult<u64> {
        self.session.advance(ConnState::ResolvingRoom);

        if let Some(room_id) = self.session.room_id() {
            return Ok(room_id);
        }

        match http::resolve_room_id(&self.http, &self.args.room_init_url, &self.session.short_id).await {
            Ok(room_id) => {
                self.session.cache_room_id(room_id);
                Ok(room_id)
            }
            Err(e) => {
                self.session.reset_lookup();
                Err(e)
            }
        }
    }

    async fn receive_loop<R>(
        &self,
        ws_rx:       &mut R,
        writer:      &FrameWriter,
        writer_task: &mut JoinHandle<LiveResult<()>>,
        shutdown:    impl Future<Output = ()>,
    ) -> LiveResult<()>
    where
        R: Stream<Item = Result<Message, tungstenite::Error>> + Unpin,
    {
        tokio::pin!(shutdown);

        loop {
            // 순서 고정: 로컬 종료 > 이미 도착한 메시지(원격 Close 포함) > writer 종료
            let step = tokio::select! {
                biased;
                _ = &mut shutdown => Step::Shutdown,
                msg = ws_rx.next() => Step::Ready(msg),
                res = &mut *writer_task => Step::WriterExit(res),
            };

            let msg = match step {
                Step::Ready(msg) => msg,
                Step::WriterExit(res) => return Err(writer_exit(res)),
                Step::Shutdown => {
                    close_gracefully(writer, writer_task).await;
                    return Ok(());
                }
            };

            let data = match msg {
                Some(Ok(Message::Binary(data))) => data,
                Some(Ok(Message::Close(frame))) => {
                    info!("[client] remote close: {:?}", frame);
                    return Ok(());
                }
                Some(Ok(Message::Text(text))) => {
                    trace!("[client] ignored text message ({}B)", text.len());
                    continue;
                }
                // Ping/Pong 은 tungstenite 가 처리
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e.into()),
                None => {
                    info!("[client] stream ended");
                    return Ok(());
                }
            };

            // 큐가 가득 차 하트비트 응답이 막혀도 종료 / writer 종료는 계속 감시
            let step = tokio::select! {
                biased;
                _ = &mut shutdown => Step::Shutdown,
                res = self.handle_message(data, writer) => Step::Ready(res),
                res = &mut *writer_task => Step::WriterExit(res),
            };

            match step {
                Step::Ready(res) => res?,
                Step::WriterExit(res) => return Err(writer_exit(res)),
                Step::Shutdown => {
                    close_gracefully(writer, writer_task).await;
                    return Ok(());
                }
            }
        }
    }

    /// 메시지 1개 = 프레임 N개. 순서대로 끝까지 처리
    async fn handle_message(&self, data: Bytes, writer: &FrameWriter) -> LiveResult<()> {
        let frames = packet::decode(&data);
        trace!("[client] message {}B -> {} frame(s)", data.len(), frames.len());

        for frame in &frames {
            dispatch_frame(frame, self.hooks.as_ref(), writer).await?;
        }
        Ok(())
    }
}

/// 수신 루프 select 결과. T = 수신 메시지 또는 메시지 처리 결과
enum Step<T> {
    Ready(T),
    WriterExit(Result<LiveResult<()>, JoinError>),
    Shutdown,
}

/// Close 큐잉 + flush 전체에 시간 한도. writer 가 막혀 있어도 반환 보장
async fn close_gracefully(writer: &FrameWriter, writer_task: &mut JoinHandle<LiveResult<()>>) {
    info!("[client] local shutdown");
    let flush = tokio::time::Duration::from_millis(CLOSE_FLUSH_MS);
    let done = tokio::time::timeout(flush, async {
        if writer.close().await.is_ok() {
            let _ = writer_task.await;
        }
    })
    .await;
    if done.is_err() {
        warn!("[client] close not flushed within {}ms", CLOSE_FLUSH_MS);
    }
}

fn writer_exit(res: Result<LiveResult<()>, JoinError>) -> LiveError {
    match res {
        Ok(Err(e)) => e,
        Ok(Ok(())) => LiveError::Transport("writer stopped".to_string()),
        Err(e)     => LiveError::Transport(format!("writer task failed: {}", e)),
    }
}
