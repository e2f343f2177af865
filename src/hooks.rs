// author: kodeholic (powered by Claude)
//
// 외부 협력자에게 노출되는 이벤트 훅
//
// 수신 태스크 위에서 동기적으로 호출됨 → 오래 블로킹하면 수신 루프 전체가 멈춤.
// 무거운 처리는 구현체 쪽에서 채널로 넘길 것.

/// 기본 구현은 모두 no-op
pub trait LiveHooks: Send + Sync {
    /// 인기(시청자 수) 값 수신
    fn on_popularity(&self, _popularity: u32) {}

    /// 탄막 수신
    fn on_danmaku(&self, _content: &str, _username: &str) {}
}

/// 아무것도 하지 않는 훅 (로그만 보고 싶을 때)
pub struct NoopHooks;

impl LiveHooks for NoopHooks {}
