// author: kodeholic (powered by Claude)
//
// 와이어 프레임 코덱
//
// 프레임 구조 (big-endian):
//   +-----------+------------+-------------+-----------+-----------+--------+
//   | total_len | header_len | proto_ver   | operation | sequence  | body   |
//   |   u32     |  u16 (=16) |  u16 (=1)   |   u32     |  u32 (=1) | bytes  |
//   +-----------+------------+-------------+-----------+-----------+--------+
//
// 서버는 WS 메시지 하나에 여러 프레임을 이어 붙여 보냄 → decode()는 Vec<Frame> 반환

use bytes::{Buf, BufMut, Bytes, BytesMut};
use serde::Serialize;
use tracing::debug;

use crate::config::{HEADER_LEN, OUTBOUND_SEQUENCE, PROTOCOL_VERSION};
use crate::error::LiveResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub total_len:        u32,
    pub header_len:       u16,
    pub protocol_version: u16,
    pub operation:        u32,
    pub sequence:         u32,
}

impl FrameHeader {
    /// 송신용 헤더 — header_len / proto_ver / sequence 는 고정값
    pub fn outbound(operation: u32, body_len: usize) -> Self {
        Self {
            total_len:        (HEADER_LEN + body_len) as u32,
            header_len:       HEADER_LEN as u16,
            protocol_version: PROTOCOL_VERSION,
            operation,
            sequence:         OUTBOUND_SEQUENCE,
        }
    }

    /// 16바이트 미만이면 None
    pub fn parse(mut src: &[u8]) -> Option<Self> {
        if src.len() < HEADER_LEN {
            return None;
        }
        Some(Self {
            total_len:        src.get_u32(),
            header_len:       src.get_u16(),
            protocol_version: src.get_u16(),
            operation:        src.get_u32(),
            sequence:         src.get_u32(),
        })
    }

    fn write_to(&self, dst: &mut BytesMut) {
        dst.put_u32(self.total_len);
        dst.put_u16(self.header_len);
        dst.put_u16(self.protocol_version);
        dst.put_u32(self.operation);
        dst.put_u32(self.sequence);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub header: FrameHeader,
    /// 수신 버퍼의 zero-copy 슬라이스
    pub body:   Bytes,
}

impl Frame {
    pub fn operation(&self) -> u32 {
        self.header.operation
    }
}

// ----------------------------------------------------------------------------
// [encode]
// ----------------------------------------------------------------------------

/// payload 를 JSON(UTF-8)으로 직렬화하여 프레임으로 감쌈
pub fn encode(payload: &impl Serialize, operation: u32) -> LiveResult<Bytes> {
    let body = serde_json::to_vec(payload)?;
    Ok(encode_raw(&body, operation))
}

/// JSON 이 아닌 body (POPULARITY 등) 를 그대로 프레임으로 감쌈
pub fn encode_raw(body: &[u8], operation: u32) -> Bytes {
    let header = FrameHeader::outbound(operation, body.len());
    let mut buf = BytesMut::with_capacity(HEADER_LEN + body.len());
    header.write_to(&mut buf);
    buf.put_slice(body);
    buf.freeze()
}

// ----------------------------------------------------------------------------
// [decode]
// ----------------------------------------------------------------------------

/// 이어 붙은 프레임들을 순서대로 분리.
/// 헤더/본문이 잘린 꼬리는 조용히 버리고 그때까지 추출한 프레임만 반환 (에러 아님)
pub fn decode(buf: &Bytes) -> Vec<Frame> {
    let mut frames = Vec::new();
    let mut offset = 0usize;

    while offset < buf.len() {
        let remaining = buf.len() - offset;

        let header = match FrameHeader::parse(&buf[offset..]) {
            Some(h) => h,
            None => {
                debug!("[codec] partial header dropped ({} bytes left)", remaining);
                break;
            }
        };

        let total_len = header.total_len as usize;
        // total_len < 16 이면 offset 이 전진하지 못함 → 잘린 것으로 간주
        if total_len < HEADER_LEN || total_len > remaining {
            debug!("[codec] truncated frame dropped (total_len={} remaining={})", total_len, remaining);
            break;
        }

        frames.push(Frame {
            header,
            body: buf.slice(offset + HEADER_LEN..offset + total_len),
        });
        offset += total_len;
    }

    frames
}
