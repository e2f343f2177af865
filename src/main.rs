// author: kodeholic (powered by Claude)
//
// lcdanmaku — 방송 탄막 실시간 관찰 CLI
//
// 사용법:
//   lcdanmaku [--uid UID] [--room-init-url URL] [--ws-url URL] [--heartbeat-ms MS] <SHORT_ID>
//
// 예시:
//   lcdanmaku 5440                       # 익명으로 5440 방 관찰
//   RUST_LOG=debug lcdanmaku 5440        # 미인식 명령 / 잘린 프레임까지 로그
//   DANMAKU_UID=12345 lcdanmaku 5440     # uid 지정 (환경변수)

use clap::Parser;
use colored::Colorize;
use std::sync::Arc;

use mini_danmaku::utils::{current_timestamp, format_ts};
use mini_danmaku::{config, run_client, ClientArgs, LiveHooks};

// ----------------------------------------------------------------------------
// [CLI 인자]
// ----------------------------------------------------------------------------

#[derive(Parser)]
#[command(
    name    = "lcdanmaku",
    about   = "방송 채팅(탄막) 실시간 스트림 관찰",
    version,
)]
struct Cli {
    /// 방송 URL 의 방 번호 (short id)
    short_id: String,

    /// 로그인 uid (생략 시 DANMAKU_UID 환경변수, 없으면 0 = 익명)
    #[arg(long)]
    uid: Option<u64>,

    /// room id 조회 API
    #[arg(long, default_value = config::ROOM_INIT_URL)]
    room_init_url: String,

    /// 채팅 WebSocket 엔드포인트
    #[arg(long, default_value = config::WEBSOCKET_URL)]
    ws_url: String,

    /// 주기 하트비트 간격 (밀리초)
    #[arg(long, default_value_t = config::HEARTBEAT_INTERVAL_MS)]
    heartbeat_ms: u64,
}

// ----------------------------------------------------------------------------
// [이벤트 출력 훅]
// ----------------------------------------------------------------------------

struct PrintHooks;

impl LiveHooks for PrintHooks {
    fn on_popularity(&self, popularity: u32) {
        println!(
            "  {} {} {}",
            format_ts(current_timestamp()).dimmed(),
            "POP".bright_yellow(),
            popularity.to_string().bright_yellow().bold(),
        );
    }

    fn on_danmaku(&self, content: &str, username: &str) {
        println!(
            "  {} {} {}",
            format_ts(current_timestamp()).dimmed(),
            truncate(username, 18).bright_cyan(),
            content,
        );
    }
}

/// 글자 수 기준 (닉네임에 멀티바이트 문자가 흔함)
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        format!("{:<width$}", s, width = max)
    } else {
        let head: String = s.chars().take(max - 1).collect();
        format!("{}…", head)
    }
}

// ----------------------------------------------------------------------------
// [메인]
// ----------------------------------------------------------------------------

#[tokio::main]
async fn main() {
    // 환경 변수 기반 로깅 초기화 (기본값: info)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let uid = cli.uid.unwrap_or_else(|| {
        std::env::var("DANMAKU_UID")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(config::ANONYMOUS_UID)
    });

    let args = ClientArgs {
        short_id:              cli.short_id,
        uid,
        room_init_url:         cli.room_init_url,
        websocket_url:         cli.ws_url,
        heartbeat_interval_ms: cli.heartbeat_ms,
    };

    println!("{}", "─".repeat(90).dimmed());
    println!(
        "  {} {}  room {}",
        "lcdanmaku".bold().cyan(),
        "▶".green(),
        args.short_id.bright_white(),
    );
    println!("{}", "─".repeat(90).dimmed());

    match run_client(args, Arc::new(PrintHooks)).await {
        Ok(()) => {
            println!("{}", "─".repeat(90).dimmed());
            println!("  스트림 종료");
        }
        Err(e) => {
            eprintln!("{} {}", "✗".red(), e);
            std::process::exit(1);
        }
    }
}
