//! 会话流程
//!
//! 组合解析器、录制端、回放调度器与 adb，供命令行入口使用。

use std::fs::File;
use std::io;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::console::{self, Style};
use crate::device::Adb;
use crate::error::{Error, Result};
use crate::log::{Clock, SystemClock};
use crate::proto::parse_event_line;
use crate::record::{DeviceFilter, RecordStats, RecordingSink};
use crate::replay::{PlaybackStats, Player};

/// `--report-json` 写出的会话统计
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SessionReport {
    Record(RecordStats),
    Play(PlaybackStats),
}

pub fn write_report(path: &Path, report: &SessionReport) -> Result<()> {
    let write = || -> io::Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, report)?;
        Ok(())
    };
    write().map_err(|source| Error::Report {
        path: path.to_path_buf(),
        source,
    })
}

/// 把行流逐行喂给录制端，直到行流结束，然后结束会话。
pub fn record_lines<I, W>(lines: I, mut sink: RecordingSink<W>) -> Result<RecordStats>
where
    I: IntoIterator<Item = io::Result<String>>,
    W: io::Write,
{
    for line in lines {
        let line = line.map_err(Error::Stream)?;
        if let Some(ev) = parse_event_line(&line) {
            sink.submit(ev)?;
        }
    }
    sink.finish()
}

/// 录制：`adb shell getevent` → 日志文件
#[tracing::instrument(skip(adb, path), fields(path = %path.display()))]
pub fn record(adb: &Adb, path: &Path, filter: DeviceFilter) -> Result<RecordStats> {
    console::say(Style::Info, "Start recording");
    let sink = RecordingSink::begin(path, filter)?;
    let stream = adb.stream(&["getevent"])?;
    let stats = record_lines(stream, sink)?;
    console::say(Style::Info, "End recording");
    Ok(stats)
}

/// 实时显示事件（带观测时间戳），不落盘
pub fn show(adb: &Adb) -> Result<u64> {
    let stream = adb.stream(&["getevent", "-r", "-q"])?;
    show_lines(stream, &SystemClock, |line| console::say(Style::Plain, line))
}

/// 非空行加上观测时间戳后交给 `out`，返回输出的行数
pub fn show_lines<I>(lines: I, clock: &dyn Clock, mut out: impl FnMut(&str)) -> Result<u64>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let mut shown = 0;
    for line in lines {
        let line = line.map_err(Error::Stream)?;
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        out(&format!("{} {}", clock.now().as_millis(), line));
        shown += 1;
    }
    Ok(shown)
}

/// 打印 `getevent -i` 的设备清单（跳过空行）
pub fn list(adb: &Adb) -> Result<()> {
    console::say(Style::Info, "List all events");
    let inventory = adb.list_devices()?;
    for line in inventory.lines().filter(|l| !l.trim().is_empty()) {
        console::say(Style::Plain, line);
    }
    Ok(())
}

/// 回放：可选地先启动 activity，再按日志时序发送事件
#[tracing::instrument(skip(adb, path), fields(path = %path.display()))]
pub fn play(
    adb: &mut Adb,
    path: &Path,
    repeat: bool,
    activity: Option<&str>,
) -> Result<PlaybackStats> {
    if let Some(activity) = activity {
        console::say(Style::Info, format!("Go to the activity: {activity}"));
        adb.start_activity(activity)?;
    }
    console::say(Style::Info, "Start playing");
    let stats = Player::default().play(path, repeat, adb)?;
    info!(emitted = stats.emitted, "回放结束");
    console::say(Style::Info, "End playing");
    Ok(stats)
}
