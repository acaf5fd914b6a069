//! adb 子进程封装
//!
//! 一次性命令用 `run`/`shell`，返回 `CommandOutput`；长连接的事件流用 `stream`，
//! 由 `EventStream` 持有子进程，drop 时 kill 并回收。

use std::io::{self, BufRead, BufReader};
use std::process::{Child, ChildStdout, Command, Stdio};

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::proto::ParsedEvent;

use super::EventSink;

/// 一次子进程调用的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// 退出码；被信号终止时为 `None`
    pub exit_code: Option<i32>,
    pub stdout: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// adb 命令行封装
#[derive(Debug, Clone)]
pub struct Adb {
    program: String,
    /// 传 `-d`，只连 USB 设备
    usb_only: bool,
}

impl Default for Adb {
    fn default() -> Self {
        Self::new("adb")
    }
}

impl Adb {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            usb_only: false,
        }
    }

    pub fn usb_only(mut self, usb_only: bool) -> Self {
        self.usb_only = usb_only;
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn args_with_prefix<'a>(&self, args: &[&'a str]) -> Vec<&'a str> {
        let mut full = Vec::with_capacity(args.len() + 1);
        if self.usb_only {
            full.push("-d");
        }
        full.extend_from_slice(args);
        full
    }

    fn describe(&self, args: &[&str]) -> String {
        let mut s = self.program.clone();
        for a in self.args_with_prefix(args) {
            s.push(' ');
            s.push_str(a);
        }
        s
    }

    /// 运行 adb 并等待退出，收集 stdout
    pub fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        let full = self.args_with_prefix(args);
        debug!(program = %self.program, args = ?full, "运行 adb");
        let output = Command::new(&self.program)
            .args(&full)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| Error::Spawn {
                program: self.program.clone(),
                source,
            })?;
        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }

    /// `adb shell <args>`
    pub fn shell(&self, args: &[&str]) -> Result<CommandOutput> {
        let mut full = vec!["shell"];
        full.extend_from_slice(args);
        self.run(&full)
    }

    fn shell_checked(&self, args: &[&str]) -> Result<CommandOutput> {
        let out = self.shell(args)?;
        if !out.success() {
            let mut full = vec!["shell"];
            full.extend_from_slice(args);
            return Err(Error::CommandFailed {
                command: self.describe(&full),
                exit_code: out.exit_code,
            });
        }
        Ok(out)
    }

    /// `adb root`：读写 /dev/input 需要 root
    pub fn check_permission(&self) -> Result<()> {
        info!("检查权限");
        let out = self.run(&["root"])?;
        if !out.success() {
            return Err(Error::Permission {
                exit_code: out.exit_code,
            });
        }
        Ok(())
    }

    /// `am start -a <activity>`
    pub fn start_activity(&self, activity: &str) -> Result<()> {
        info!(activity, "启动 activity");
        self.shell_checked(&["am", "start", "-a", activity])?;
        Ok(())
    }

    /// `getevent -i` 的设备清单
    pub fn list_devices(&self) -> Result<String> {
        Ok(self.shell_checked(&["getevent", "-i"])?.stdout)
    }

    /// `sendevent <device> <type> <code> <value>`
    pub fn send_event(&self, event: &ParsedEvent) -> Result<()> {
        let ty = event.ty.to_string();
        let code = event.code.to_string();
        let value = event.value.to_string();
        self.shell_checked(&[
            "sendevent",
            event.device.as_str(),
            ty.as_str(),
            code.as_str(),
            value.as_str(),
        ])?;
        Ok(())
    }

    /// 启动一个长时间运行的 `adb shell <args>`，按行读取其 stdout
    pub fn stream(&self, args: &[&str]) -> Result<EventStream> {
        let mut full = vec!["shell"];
        full.extend_from_slice(args);
        let full = self.args_with_prefix(&full);
        debug!(program = %self.program, args = ?full, "启动事件流");

        let mut child = Command::new(&self.program)
            .args(&full)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| Error::Spawn {
                program: self.program.clone(),
                source,
            })?;
        let stdout = child.stdout.take().ok_or_else(|| Error::Spawn {
            program: self.program.clone(),
            source: io::Error::other("child stdout not captured"),
        })?;
        Ok(EventStream {
            child,
            reader: BufReader::new(stdout),
        })
    }
}

impl EventSink for Adb {
    fn emit(&mut self, event: &ParsedEvent) -> Result<()> {
        self.send_event(event)
    }
}

/// 子进程的行流。连接断开（EOF）时迭代结束。
pub struct EventStream {
    child: Child,
    reader: BufReader<ChildStdout>,
}

impl Iterator for EventStream {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                }
                Some(Ok(String::from_utf8_lossy(&buf).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

impl Drop for EventStream {
    fn drop(&mut self) {
        // 已退出的子进程 kill 会失败，忽略
        let _ = self.child.kill();
        if let Err(e) = self.child.wait() {
            warn!(error = %e, "回收子进程失败");
        }
    }
}
