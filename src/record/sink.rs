//! 录制端（Recording Sink）
//!
//! 每提交一个事件就立即写入并 flush，进程中途被杀时已写入的行都在磁盘上。

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::console::{self, Style};
use crate::error::{Error, Result};
use crate::log::{Clock, RecordedEvent, SystemClock, Timestamp};
use crate::proto::ParsedEvent;

use super::filter::DeviceFilter;

/// 录制统计
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecordStats {
    /// 提交的事件数
    pub seen: u64,
    /// 被设备过滤器丢弃的事件数
    pub filtered: u64,
    /// 写入日志的事件数
    pub written: u64,
    pub first_ms: Option<u64>,
    pub last_ms: Option<u64>,
}

/// 录制会话的写入端。`finish` 消耗 `self`，结束后无法再提交事件。
pub struct RecordingSink<W: Write> {
    out: W,
    filter: DeviceFilter,
    clock: Box<dyn Clock>,
    echo: bool,
    stats: RecordStats,
}

impl RecordingSink<BufWriter<File>> {
    /// 创建（截断）日志文件并开始会话
    pub fn begin(path: &Path, filter: DeviceFilter) -> Result<Self> {
        let file = File::create(path).map_err(|source| Error::OpenLog {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), filter = ?filter, "开始录制");
        Ok(Self::with_writer(
            BufWriter::new(file),
            filter,
            Box::new(SystemClock),
        ))
    }
}

impl<W: Write> RecordingSink<W> {
    pub fn with_writer(out: W, filter: DeviceFilter, clock: Box<dyn Clock>) -> Self {
        Self {
            out,
            filter,
            clock,
            echo: true,
            stats: RecordStats::default(),
        }
    }

    /// 是否把写入的行回显到控制台（默认开启）
    pub fn set_echo(&mut self, echo: bool) {
        self.echo = echo;
    }

    pub fn stats(&self) -> &RecordStats {
        &self.stats
    }

    /// 提交一个事件；返回写入的录制事件，被过滤则返回 `None`。
    pub fn submit(&mut self, event: ParsedEvent) -> Result<Option<RecordedEvent>> {
        self.stats.seen += 1;
        if !self.filter.matches(&event.device) {
            self.stats.filtered += 1;
            trace!(device = %event.device, "设备不匹配，丢弃");
            return Ok(None);
        }

        let rec = RecordedEvent::new(self.clock.now(), event);
        let line = rec.to_line();
        writeln!(self.out, "{line}").map_err(Error::WriteLog)?;
        self.out.flush().map_err(Error::WriteLog)?;

        self.note_written(rec.timestamp);
        debug!(timestamp = rec.timestamp.as_millis(), device = %rec.event.device, "写入事件");
        if self.echo {
            console::say(Style::Plain, &line);
        }
        Ok(Some(rec))
    }

    /// 结束会话：flush 并关闭输出。
    pub fn finish(mut self) -> Result<RecordStats> {
        self.out.flush().map_err(Error::WriteLog)?;
        info!(
            seen = self.stats.seen,
            filtered = self.stats.filtered,
            written = self.stats.written,
            "结束录制"
        );
        Ok(self.stats)
    }

    fn note_written(&mut self, ts: Timestamp) {
        self.stats.written += 1;
        self.stats.first_ms.get_or_insert(ts.as_millis());
        self.stats.last_ms = Some(ts.as_millis());
    }
}
