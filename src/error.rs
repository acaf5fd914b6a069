//! 错误类型
//!
//! 录制/回放会话中的致命错误。格式不匹配的输入行不算错误，直接跳过。

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot open log {} for writing: {source}", path.display())]
    OpenLog { path: PathBuf, source: io::Error },

    #[error("cannot read log {}: {source}", path.display())]
    ReadLog { path: PathBuf, source: io::Error },

    #[error("failed to write log: {0}")]
    WriteLog(#[source] io::Error),

    #[error("event stream read failed: {0}")]
    Stream(#[source] io::Error),

    #[error("failed to run `{program}`: {source}")]
    Spawn { program: String, source: io::Error },

    /// 外部命令返回非零退出码（`None` 表示被信号终止）
    #[error("`{command}` failed with exit code {exit_code:?}")]
    CommandFailed {
        command: String,
        exit_code: Option<i32>,
    },

    #[error("insufficient permissions: `adb root` exited with {exit_code:?}")]
    Permission { exit_code: Option<i32> },

    #[error("cannot write report {}: {source}", path.display())]
    Report { path: PathBuf, source: io::Error },
}
