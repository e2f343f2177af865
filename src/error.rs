// author: kodeholic (powered by Gemini)

use std::fmt;

#[derive(Debug)]
pub enum LiveError {
    /// room id 조회 실패 (HTTP 비정상 응답 포함) — 치명적, 재시도 없음
    Network(String),
    /// 소켓 송수신 실패 — 치명적, 연결은 Closed 로 전이
    Transport(String),
    /// COMMAND body 파싱 실패 — 해당 프레임만 skip
    Decode(String),
}

impl fmt::Display for LiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiveError::Network(msg)   => write!(f, "Room lookup failed: {}", msg),
            LiveError::Transport(msg) => write!(f, "Socket transport error: {}", msg),
            LiveError::Decode(msg)    => write!(f, "Malformed command payload: {}", msg),
        }
    }
}

impl std::error::Error for LiveError {}

impl From<reqwest::Error> for LiveError {
    fn from(err: reqwest::Error) -> Self {
        LiveError::Network(err.to_string())
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for LiveError {
    fn from(err: tokio_tungstenite::tungstenite::Error) -> Self {
        LiveError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for LiveError {
    fn from(err: serde_json::Error) -> Self {
        LiveError::Decode(err.to_string())
    }
}

pub type LiveResult<T> = Result<T, LiveError>;
