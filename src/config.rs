// author: kodeholic (powered by Claude)
// 매직 넘버를 배제하고 프로토콜 상수와 클라이언트 기본값을 모아둔 곳입니다.

// ----------------------------------------------------------------------------
// 외부 엔드포인트
// ----------------------------------------------------------------------------

/// short id → 실제 room id 조회 API
pub const ROOM_INIT_URL: &str = "https://api.live.bilibili.com/room/v1/Room/room_init";

/// 방송 채팅 WebSocket 엔드포인트
pub const WEBSOCKET_URL: &str = "wss://broadcastlv.chat.bilibili.com:2245/sub";

/// room_init 조회 타임아웃 (10초)
pub const ROOM_INIT_TIMEOUT_MS: u64 = 10_000;

// ----------------------------------------------------------------------------
// 와이어 프레임 헤더
// ----------------------------------------------------------------------------

/// 고정 헤더 길이 (total_len 4 + header_len 2 + ver 2 + op 4 + seq 4)
pub const HEADER_LEN: usize = 16;

/// 프로토콜 버전 — 이 클라이언트는 항상 1 (압축 없는 JSON body)
pub const PROTOCOL_VERSION: u16 = 1;

/// 송신 프레임 sequence. 서버가 검증하지 않으므로 상수로 취급
pub const OUTBOUND_SEQUENCE: u32 = 1;

// ----------------------------------------------------------------------------
// 인증 / 하트비트
// ----------------------------------------------------------------------------

/// 비로그인(익명) uid
pub const ANONYMOUS_UID: u64 = 0;

pub const AUTH_PROTOVER:  u32  = 1;
pub const AUTH_PLATFORM:  &str = "web";
pub const AUTH_CLIENTVER: &str = "1.4.0";

/// 주기 하트비트 송신 간격 (30초)
pub const HEARTBEAT_INTERVAL_MS: u64 = 30_000;

/// 송신(Egress) writer 큐 사이즈.
/// 단일 writer 태스크가 소비하며, 꽉 차면 송신자가 대기합니다(Backpressure).
pub const EGRESS_QUEUE_SIZE: usize = 64;
