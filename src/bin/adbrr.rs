//! adbrr 命令行入口
//!
//! 录制 / 回放 Android 设备的内核输入事件（getevent / sendevent）

use std::path::PathBuf;
use std::process::ExitCode;

use adbrr_rs::console::{self, Style};
use adbrr_rs::device::Adb;
use adbrr_rs::error::Result;
use adbrr_rs::record::DeviceFilter;
use adbrr_rs::session::{self, SessionReport};
use clap::{ArgGroup, Parser};
use tracing::debug;

#[derive(Debug, Parser)]
#[command(
    name = "adbrr",
    about = "Record and replay Android input events over adb",
    group(ArgGroup::new("mode").args(["record", "play", "show", "list"]))
)]
struct Args {
    /// Record events into this log file
    #[arg(long, value_name = "PATH")]
    record: Option<PathBuf>,

    /// Only record /dev/input/event<INDEX> (e.g. -n3)
    #[arg(short = 'n', value_name = "INDEX", requires = "record")]
    device_index: Option<u32>,

    /// Replay this log file
    #[arg(long, value_name = "PATH")]
    play: Option<PathBuf>,

    /// Replay the whole log (default: only the first event)
    #[arg(long, requires = "play")]
    repeat: bool,

    /// Start this activity (`am start -a`) before replaying
    #[arg(long, value_name = "NAME", requires = "play")]
    activity: Option<String>,

    /// Print live events with capture timestamps, without recording
    #[arg(long)]
    show: bool,

    /// Print the input device inventory (`getevent -i`)
    #[arg(long)]
    list: bool,

    /// Talk to the USB-attached device (`adb -d`)
    #[arg(short = 'd', long = "device")]
    usb: bool,

    /// adb executable
    #[arg(long, env = "ADB", default_value = "adb")]
    adb: String,

    /// Skip `adb root` before recording / showing
    #[arg(long)]
    no_root: bool,

    /// Write session statistics as JSON
    #[arg(long, value_name = "PATH")]
    report_json: Option<PathBuf>,
}

fn print_usage() {
    console::say(Style::Error, "Add --record [Path] to record");
    console::say(Style::Error, "Add --play [Path] to play");
    console::say(Style::Error, "Add --show to display live events");
    console::say(Style::Error, "Add --list to list input devices");
}

/// 返回 `Ok(false)` 表示未指定任何模式
fn run(args: Args) -> Result<bool> {
    let mut adb = Adb::new(args.adb.clone()).usb_only(args.usb);
    debug!(?args, "解析参数");

    let report = if let Some(path) = &args.record {
        if !args.no_root {
            adb.check_permission()?;
        }
        let filter = DeviceFilter::from_index(args.device_index);
        Some(SessionReport::Record(session::record(&adb, path, filter)?))
    } else if let Some(path) = &args.play {
        let stats = session::play(&mut adb, path, args.repeat, args.activity.as_deref())?;
        Some(SessionReport::Play(stats))
    } else if args.show {
        if !args.no_root {
            adb.check_permission()?;
        }
        session::show(&adb)?;
        None
    } else if args.list {
        session::list(&adb)?;
        None
    } else {
        return Ok(false);
    };

    if let (Some(path), Some(report)) = (&args.report_json, &report) {
        session::write_report(path, report)?;
        eprintln!("wrote session report to {}", path.display());
    }
    Ok(true)
}

fn main() -> ExitCode {
    // 初始化 tracing（stderr，stdout 只留给事件输出）
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            print_usage();
            ExitCode::from(2)
        }
        Err(e) => {
            console::say(Style::Error, e.to_string());
            ExitCode::FAILURE
        }
    }
}
