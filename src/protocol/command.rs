// author: kodeholic (powered by Claude)
//
// COMMAND(op 5) 처리기
//
// body 는 단일 객체 { "cmd": "...", ... } 이거나 그 배열(배치). 배열은 임의 깊이로 중첩될 수 있음.
// 재귀 대신 명시적 work stack 으로 평탄화 → 악의적인 깊은 중첩에도 네이티브 스택 사용량 고정

use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::error::{LiveError, LiveResult};
use crate::hooks::LiveHooks;

/// 서버 명령. 모르는 cmd 는 Unknown 으로 흡수 (서버 측 신규 명령 호환)
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// DANMU_MSG — 탄막
    Danmaku { content: String, username: String },
    /// SEND_GIFT — 선물
    SendGift,
    /// WELCOME — 입장 환영
    Welcome,
    /// PREPARING — 방송 준비 중
    Preparing,
    /// LIVE — 방송 시작
    Live,
    Unknown(String),
}

impl Command {
    /// 단일 명령 객체 해석. cmd 누락 / DANMU_MSG 필드 불일치는 Decode 에러
    pub fn from_value(value: &Value) -> LiveResult<Self> {
        let cmd = value
            .get("cmd")
            .and_then(Value::as_str)
            .ok_or_else(|| LiveError::Decode("missing string field `cmd`".to_string()))?;

        let command = match cmd {
            "DANMU_MSG" => parse_danmaku(value)?,
            "SEND_GIFT" => Command::SendGift,
            "WELCOME"   => Command::Welcome,
            "PREPARING" => Command::Preparing,
            "LIVE"      => Command::Live,
            other       => Command::Unknown(other.to_string()),
        };
        Ok(command)
    }
}

/// info[1] = 내용, info[2][1] = 작성자 닉네임
fn parse_danmaku(value: &Value) -> LiveResult<Command> {
    let info = &value["info"];

    let content = info[1]
        .as_str()
        .ok_or_else(|| LiveError::Decode("DANMU_MSG info[1] is not a string".to_string()))?;
    let username = info[2][1]
        .as_str()
        .ok_or_else(|| LiveError::Decode("DANMU_MSG info[2][1] is not a string".to_string()))?;

    Ok(Command::Danmaku {
        content:  content.to_string(),
        username: username.to_string(),
    })
}

// ----------------------------------------------------------------------------
// [처리 진입점]
// ----------------------------------------------------------------------------

/// 배치를 원래 순서대로 평탄화하며 각 명령 객체를 처리.
/// 반환값: 처리한 명령 객체 수 (해석 실패로 skip 한 객체 포함)
pub fn process_command(value: Value, hooks: &dyn LiveHooks) -> usize {
    let mut stack = vec![value];
    let mut handled = 0usize;

    while let Some(value) = stack.pop() {
        match value {
            // 역순으로 push 해야 pop 순서가 원래 순서가 됨
            Value::Array(items) => stack.extend(items.into_iter().rev()),
            Value::Object(_) => {
                handled += 1;
                match Command::from_value(&value) {
                    Ok(cmd) => handle_one(cmd, hooks),
                    Err(e)  => warn!("[command] skipped: {}", e),
                }
            }
            other => warn!("[command] skipped non-object element: {}", other),
        }
    }

    handled
}

fn handle_one(cmd: Command, hooks: &dyn LiveHooks) {
    match cmd {
        Command::Danmaku { content, username } => {
            trace!("[command] DANMU_MSG {}: {}", username, content);
            hooks.on_danmaku(&content, &username);
        }
        Command::Unknown(name) => {
            debug!("[command] unrecognized cmd: {}", name);
        }
        // SEND_GIFT / WELCOME / PREPARING / LIVE — 인식만 하고 처리는 외부 몫
        other => trace!("[command] {:?} (no-op)", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        danmaku: Mutex<Vec<(String, String)>>,
    }

    impl LiveHooks for Recorder {
        fn on_danmaku(&self, content: &str, username: &str) {
            self.danmaku.lock().unwrap().push((content.to_string(), username.to_string()));
        }
    }

    fn danmu(content: &str, user: &str) -> Value {
        json!({ "cmd": "DANMU_MSG", "info": [[0, 1, 25], content, [42, user, 0]] })
    }

    #[test]
    fn danmu_msg_extracts_content_and_username() {
        let cmd = json!({ "cmd": "DANMU_MSG", "info": ["ignored", "hello world", ["ignored", "Alice"]] });
        assert_eq!(
            Command::from_value(&cmd).unwrap(),
            Command::Danmaku { content: "hello world".into(), username: "Alice".into() },
        );

        let rec = Recorder::default();
        assert_eq!(process_command(cmd, &rec), 1);
        assert_eq!(*rec.danmaku.lock().unwrap(), vec![("hello world".to_string(), "Alice".to_string())]);
    }

    #[test]
    fn batch_dispatches_in_order() {
        let rec = Recorder::default();
        let batch = json!([danmu("a", "u1"), danmu("b", "u2"), danmu("c", "u3")]);

        assert_eq!(process_command(batch, &rec), 3);

        let got: Vec<String> = rec.danmaku.lock().unwrap().iter().map(|(c, _)| c.clone()).collect();
        assert_eq!(got, vec!["a", "b", "c"]);
    }

    #[test]
    fn nested_batches_flatten_fully() {
        let rec = Recorder::default();
        let batch = json!([danmu("a", "u"), [danmu("b", "u"), [[danmu("c", "u")]]], danmu("d", "u")]);

        assert_eq!(process_command(batch, &rec), 4);

        let got: Vec<String> = rec.danmaku.lock().unwrap().iter().map(|(c, _)| c.clone()).collect();
        assert_eq!(got, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn deep_nesting_does_not_overflow() {
        let mut value = danmu("deep", "u");
        for _ in 0..20_000 {
            value = Value::Array(vec![value]);
        }

        let rec = Recorder::default();
        assert_eq!(process_command(value, &rec), 1);
        assert_eq!(rec.danmaku.lock().unwrap().len(), 1);
    }

    #[test]
    fn unknown_command_does_not_stop_batch() {
        let rec = Recorder::default();
        let batch = json!([{ "cmd": "FOO_BAR", "data": 1 }, danmu("after", "u")]);

        assert_eq!(process_command(batch, &rec), 2);
        assert_eq!(rec.danmaku.lock().unwrap().len(), 1);
        assert_eq!(
            Command::from_value(&json!({ "cmd": "FOO_BAR" })).unwrap(),
            Command::Unknown("FOO_BAR".into()),
        );
    }

    #[test]
    fn recognized_noop_commands_map_to_variants() {
        for (name, expected) in [
            ("SEND_GIFT", Command::SendGift),
            ("WELCOME", Command::Welcome),
            ("PREPARING", Command::Preparing),
            ("LIVE", Command::Live),
        ] {
            assert_eq!(Command::from_value(&json!({ "cmd": name })).unwrap(), expected);
        }
    }

    #[test]
    fn malformed_objects_are_skipped() {
        let rec = Recorder::default();
        let batch = json!([
            { "no_cmd": true },
            { "cmd": "DANMU_MSG", "info": [0] },
            7,
            danmu("ok", "u"),
        ]);

        assert_eq!(process_command(batch, &rec), 3);
        assert_eq!(rec.danmaku.lock().unwrap().len(), 1);
    }
}
