// author: kodeholic (powered by Claude)

/// Client → Server opcodes
pub mod client {
    /// 연결 유지용 하트비트. body: `{}`
    pub const SEND_HEARTBEAT: u32 = 2;
    /// 연결 직후 인증 (uid, roomid, protover, platform, clientver)
    pub const AUTH:           u32 = 7;
}

/// Server → Client opcodes
pub mod server {
    /// 인기(시청자 수) 값 푸시. body: 4바이트 big-endian u32
    pub const POPULARITY:     u32 = 3;
    /// JSON 명령 (단일 객체 또는 배치 배열)
    pub const COMMAND:        u32 = 5;
    /// 서버 하트비트 ping — 즉시 SEND_HEARTBEAT 로 응답. body 없음
    pub const RECV_HEARTBEAT: u32 = 8;
}

/// 로그 출력용 opcode 이름
pub fn op_name(op: u32) -> &'static str {
    match op {
        client::SEND_HEARTBEAT => "SEND_HEARTBEAT",
        client::AUTH           => "AUTH",
        server::POPULARITY     => "POPULARITY",
        server::COMMAND        => "COMMAND",
        server::RECV_HEARTBEAT => "RECV_HEARTBEAT",
        _                      => "UNKNOWN",
    }
}
