//! 录制日志格式
//!
//! 每行一个事件：`timestamp device type code value`，十进制、单空格分隔、`\n` 结尾。
//! 无表头、无版本号。录制端只追加写，回放端只顺序读。

mod recorded;
mod time;

pub use recorded::{RecordedEvent, parse_log_line};
pub use time::{Clock, SystemClock, Timestamp};
