// author: kodeholic (powered by Claude)

pub mod client;
pub mod config;
pub mod core;
pub mod error;
pub mod hooks;
pub mod http;
pub mod protocol;
pub mod utils;

use std::sync::Arc;
use tracing::info;

pub use crate::client::{ClientArgs, LiveClient};
pub use crate::error::{LiveError, LiveResult};
pub use crate::hooks::{LiveHooks, NoopHooks};

/// CLI 진입점 — Ctrl-C 수신 시 Close 를 보내고 정상 종료
pub async fn run_client(args: ClientArgs, hooks: Arc<dyn LiveHooks>) -> LiveResult<()> {
    info!("[mini-danmaku] short_id={} uid={}", args.short_id, args.uid);
    info!("[mini-danmaku] room_init: {}", args.room_init_url);
    info!("[mini-danmaku] endpoint:  {}", args.websocket_url);

    let mut client = LiveClient::new(args, hooks);
    client
        .start_until(async {
            // 시그널 핸들러 등록 실패 시에는 원격 종료까지 대기
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        })
        .await
}
