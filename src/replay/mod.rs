//! 回放模块
//!
//! 顺序读取日志，按相邻时间戳之差休眠，再同步地把事件发给设备。

mod pacer;
mod player;

pub use pacer::{Pacer, ThreadPacer};
pub use player::{PlaybackStats, Player};
