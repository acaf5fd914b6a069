//! 设备交互模块
//!
//! 通过 adb 子进程读取事件流、发送事件；核心逻辑只依赖 `EventSink` 这个接缝。

mod adb;

pub use adb::{Adb, CommandOutput, EventStream};

use crate::error::Result;
use crate::proto::ParsedEvent;

/// 设备命令端：每次调用同步发送一个事件，失败即返回错误。
pub trait EventSink {
    fn emit(&mut self, event: &ParsedEvent) -> Result<()>;
}
