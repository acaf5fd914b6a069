//! 回放节拍器
//!
//! 回放中唯一的阻塞点。只按日志里的时间差休眠，不补偿发送耗时与调度抖动。

use std::time::Duration;

pub trait Pacer {
    fn wait(&mut self, delay: Duration);
}

/// 用 `std::thread::sleep` 实现的节拍器
#[derive(Debug, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn wait(&mut self, delay: Duration) {
        std::thread::sleep(delay);
    }
}
