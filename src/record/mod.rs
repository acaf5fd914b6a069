//! 录制模块
//!
//! 把解析后的事件按设备过滤、打时间戳，并逐行追加到日志文件。

mod filter;
mod sink;

pub use filter::DeviceFilter;
pub use sink::{RecordStats, RecordingSink};
