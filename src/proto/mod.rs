//! 事件流协议模块
//!
//! 把 `getevent` 输出的文本行解析为结构化事件。每行独立分类，不跨行缓冲。

mod getevent;

pub use getevent::{ParsedEvent, parse_event_line};
