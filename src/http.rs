// author: kodeholic (powered by Claude)
//
// HTTP 협력자 — 연결 전 1회성 조회만 담당

pub mod room;

pub use room::resolve_room_id;
