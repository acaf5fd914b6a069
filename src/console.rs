//! 控制台输出
//!
//! 面向操作者的彩色输出。无全局状态：每次调用都带上样式。

use std::io::{self, Write};

use tracing::trace;

/// 输出样式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// 原样输出（事件行、设备清单）
    Plain,
    /// 蓝色提示（会话开始/结束）
    Info,
    /// 绿色
    Success,
    /// 黄色
    Warning,
    /// 红色错误，写到 stderr
    Error,
}

impl Style {
    fn ansi(self) -> Option<&'static str> {
        match self {
            Style::Plain => None,
            Style::Info => Some("\x1b[94m"),
            Style::Success => Some("\x1b[92m"),
            Style::Warning => Some("\x1b[93m"),
            Style::Error => Some("\x1b[91m"),
        }
    }
}

const RESET: &str = "\x1b[0m";

/// 按样式渲染一行文本（不含换行）
pub fn paint(style: Style, msg: &str) -> String {
    match style.ansi() {
        Some(code) => format!("{code}{msg}{RESET}"),
        None => msg.to_string(),
    }
}

/// 按样式写一行到 `out`
pub fn write_line(out: &mut impl Write, style: Style, msg: &str) -> io::Result<()> {
    writeln!(out, "{}", paint(style, msg))
}

/// 打印一行。控制台只是回显，写失败（例如管道被关闭）不影响会话。
pub fn say(style: Style, msg: impl AsRef<str>) {
    let res = if style == Style::Error {
        write_line(&mut io::stderr().lock(), style, msg.as_ref())
    } else {
        write_line(&mut io::stdout().lock(), style, msg.as_ref())
    };
    if let Err(e) = res {
        trace!(error = %e, "控制台输出失败");
    }
}
