//! 回放调度器（Playback Scheduler）

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::device::EventSink;
use crate::error::{Error, Result};
use crate::log::{Timestamp, parse_log_line};

use super::pacer::{Pacer, ThreadPacer};

/// 回放统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlaybackStats {
    /// 实际处理过的行数（单次模式下发出第一个事件后就停止）
    pub lines: u64,
    /// 被跳过的非法行
    pub skipped: u64,
    pub emitted: u64,
    /// 累计休眠（毫秒）
    pub waited_ms: u64,
}

/// 回放调度器：维护上一个事件的时间戳，按时间差休眠后发送。
pub struct Player {
    pacer: Box<dyn Pacer>,
    last: Option<Timestamp>,
    stats: PlaybackStats,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(Box::new(ThreadPacer))
    }
}

impl Player {
    pub fn new(pacer: Box<dyn Pacer>) -> Self {
        Self {
            pacer,
            last: None,
            stats: PlaybackStats::default(),
        }
    }

    pub fn stats(&self) -> &PlaybackStats {
        &self.stats
    }

    /// 读取整个日志文件并回放。`repeat == false` 时只发送第一个有效事件。
    #[tracing::instrument(skip(self, path, sink), fields(path = %path.display()))]
    pub fn play(
        &mut self,
        path: &Path,
        repeat: bool,
        sink: &mut dyn EventSink,
    ) -> Result<PlaybackStats> {
        let text = fs::read_to_string(path).map_err(|source| Error::ReadLog {
            path: path.to_path_buf(),
            source,
        })?;
        self.play_text(&text, repeat, sink)
    }

    /// 回放已读入内存的日志文本。发送失败立即返回，剩余事件不再发送。
    ///
    /// 每次调用都是独立会话：上一个时间戳与统计从零开始。
    pub fn play_text(
        &mut self,
        text: &str,
        repeat: bool,
        sink: &mut dyn EventSink,
    ) -> Result<PlaybackStats> {
        self.last = None;
        self.stats = PlaybackStats::default();
        info!(repeat, "▶️  开始回放");

        for line in text.lines() {
            self.stats.lines += 1;
            let Some(rec) = parse_log_line(line) else {
                self.stats.skipped += 1;
                trace!(line, "跳过非法行");
                continue;
            };

            if let Some(delay) = self.last.and_then(|last| rec.timestamp.delay_since(last)) {
                let delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
                debug!(delay_ms, "等待");
                self.pacer.wait(delay);
                self.stats.waited_ms = self.stats.waited_ms.saturating_add(delay_ms);
            }

            sink.emit(&rec.event)?;
            self.stats.emitted += 1;
            self.last = Some(rec.timestamp);
            debug!(
                timestamp = rec.timestamp.as_millis(),
                device = %rec.event.device,
                emitted = self.stats.emitted,
                "已发送事件"
            );

            if !repeat {
                break;
            }
        }

        info!(
            emitted = self.stats.emitted,
            skipped = self.stats.skipped,
            waited_ms = self.stats.waited_ms,
            "✅ 回放完成"
        );
        Ok(self.stats.clone())
    }
}
