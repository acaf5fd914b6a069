//! getevent 文本行解析
//!
//! 行尾必须是 `<device>: <hex> <hex> <hex>`，行首允许任意前缀
//! （例如 `getevent -t` 的 `[  123.456]` 时间戳）。

use std::fmt;

/// 解析得到的输入事件。`ty`/`code`/`value` 的语义不做解释，原样携带。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedEvent {
    pub device: String,
    pub ty: u32,
    pub code: u32,
    pub value: u32,
}

impl ParsedEvent {
    pub fn new(device: impl Into<String>, ty: u32, code: u32, value: u32) -> Self {
        Self {
            device: device.into(),
            ty,
            code,
            value,
        }
    }
}

impl fmt::Display for ParsedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.device, self.ty, self.code, self.value)
    }
}

/// 解析一行事件流文本；不匹配（空行、表头、十六进制非法等）返回 `None`。
pub fn parse_event_line(line: &str) -> Option<ParsedEvent> {
    // adb shell 走 pty 时行尾会带 '\r'
    let line = line.strip_suffix('\r').unwrap_or(line);
    // 与行尾锚定：末尾不能有多余空白
    if line.ends_with(char::is_whitespace) {
        return None;
    }

    let mut tokens = line.split_whitespace().rev();
    let value = tokens.next()?;
    let code = tokens.next()?;
    let ty = tokens.next()?;
    let device = tokens.next()?.strip_suffix(':')?;
    if device.is_empty() {
        return None;
    }

    Some(ParsedEvent {
        device: device.to_string(),
        ty: parse_hex(ty)?,
        code: parse_hex(code)?,
        value: parse_hex(value)?,
    })
}

fn parse_hex(token: &str) -> Option<u32> {
    if !token.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(token, 16).ok()
}
