// author: kodeholic (powered by Claude)
// Session — 연결 1회분의 상태 컨텍스트 (LiveClient 가 단독 소유)

use tracing::{trace, warn};

use crate::utils::current_timestamp;

/// 연결 상태. 선언 순서 = 전이 순서 (앞으로만 진행)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConnState {
    Disconnected,
    ResolvingRoom,
    Connected,
    Authenticated,
    /// 종료 상태 (원격 종료 / 로컬 종료 / 치명적 에러)
    Closed,
}

pub struct Session {
    pub short_id:     String,
    pub uid:          u64,
    room_id:          Option<u64>,
    state:            ConnState,
    authenticated_at: Option<u64>,
}

impl Session {
    pub fn new(short_id: impl Into<String>, uid: u64) -> Self {
        Self {
            short_id: short_id.into(),
            uid,
            room_id: None,
            state: ConnState::Disconnected,
            authenticated_at: None,
        }
    }

    pub fn state(&self) -> ConnState {
        self.state
    }

    pub fn room_id(&self) -> Option<u64> {
        self.room_id
    }

    pub fn cache_room_id(&mut self, room_id: u64) {
        self.room_id = Some(room_id);
    }

    /// 앞 단계로의 전이는 무시 (역행 없음)
    pub fn advance(&mut self, next: ConnState) {
        if next <= self.state {
            warn!("[session] ignored transition {:?} -> {:?}", self.state, next);
            return;
        }
        trace!("[session] {:?} -> {:?}", self.state, next);
        if next == ConnState::Authenticated {
            self.authenticated_at = Some(current_timestamp());
        }
        self.state = next;
    }

    /// room id 조회 실패 시에만 사용 — ResolvingRoom 에서 Disconnected 로 되돌림
    pub fn reset_lookup(&mut self) {
        if self.state == ConnState::ResolvingRoom {
            self.state = ConnState::Disconnected;
        }
    }

    /// Authenticated 이후 경과 시간 (ms)
    pub fn uptime_ms(&self) -> u64 {
        self.authenticated_at
            .map(|t| current_timestamp().saturating_sub(t))
            .unwrap_or(0)
    }
}
