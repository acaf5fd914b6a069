//! 带时间戳的录制事件及其单行文本形式

use std::fmt;

use crate::proto::ParsedEvent;

use super::time::Timestamp;

/// 一条录制事件：解析事件 + 观测时间戳。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEvent {
    pub timestamp: Timestamp,
    pub event: ParsedEvent,
}

impl RecordedEvent {
    pub fn new(timestamp: Timestamp, event: ParsedEvent) -> Self {
        Self { timestamp, event }
    }

    /// 序列化为一行日志（不含换行）。
    pub fn to_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RecordedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.timestamp.as_millis(), self.event)
    }
}

/// 解析一行日志。字段数不是 5、或数值字段不是规范十进制时返回 `None`。
///
/// 规范十进制：只含 ASCII 数字，无符号，除 `0` 外无前导零。
/// 因此任何被接受的单空格分隔行都能逐字节还原。
pub fn parse_log_line(line: &str) -> Option<RecordedEvent> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let mut fields = line.split_whitespace();
    let timestamp = fields.next()?;
    let device = fields.next()?;
    let ty = fields.next()?;
    let code = fields.next()?;
    let value = fields.next()?;
    if fields.next().is_some() {
        return None;
    }

    Some(RecordedEvent {
        timestamp: Timestamp(parse_decimal(timestamp)?),
        event: ParsedEvent {
            device: device.to_string(),
            ty: u32::try_from(parse_decimal(ty)?).ok()?,
            code: u32::try_from(parse_decimal(code)?).ok()?,
            value: u32::try_from(parse_decimal(value)?).ok()?,
        },
    })
}

fn parse_decimal(token: &str) -> Option<u64> {
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if token.len() > 1 && token.starts_with('0') {
        return None;
    }
    token.parse().ok()
}
