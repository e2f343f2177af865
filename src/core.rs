// author: kodeholic (powered by Gemini)
// 연결 1회분의 상태와 송신 경로 관리 모듈입니다.

pub mod heartbeat;
pub mod session;
pub mod writer;

pub use session::{ConnState, Session};
pub use writer::{FrameWriter, Outbound};
