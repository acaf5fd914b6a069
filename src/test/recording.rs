use std::cell::Cell;
use std::fs;

use crate::log::{Clock, Timestamp};
use crate::proto::ParsedEvent;
use crate::record::{DeviceFilter, RecordStats, RecordingSink};

/// 每次取时间前进 `step` 毫秒
struct StepClock {
    next: Cell<u64>,
    step: u64,
}

impl StepClock {
    fn boxed(start: u64, step: u64) -> Box<Self> {
        Box::new(Self {
            next: Cell::new(start),
            step,
        })
    }
}

impl Clock for StepClock {
    fn now(&self) -> Timestamp {
        let t = self.next.get();
        self.next.set(t + self.step);
        Timestamp(t)
    }
}

fn quiet_sink(out: &mut Vec<u8>, filter: DeviceFilter) -> RecordingSink<&mut Vec<u8>> {
    let mut sink = RecordingSink::with_writer(out, filter, StepClock::boxed(1_000, 10));
    sink.set_echo(false);
    sink
}

#[test]
fn filter_from_index_targets_event_node() {
    let filter = DeviceFilter::from_index(Some(3));
    assert_eq!(filter, DeviceFilter::Device("/dev/input/event3".to_string()));
    assert!(filter.matches("/dev/input/event3"));
    assert!(!filter.matches("/dev/input/event31"));
    assert!(DeviceFilter::from_index(None).matches("/dev/input/event31"));
}

#[test]
fn writes_one_timestamped_line_per_event_in_arrival_order() {
    let mut out = Vec::new();
    let mut sink = quiet_sink(&mut out, DeviceFilter::Any);
    sink.submit(ParsedEvent::new("/dev/input/event1", 3, 53, 450))
        .expect("submit");
    sink.submit(ParsedEvent::new("/dev/input/event2", 1, 330, 1))
        .expect("submit");
    let stats = sink.finish().expect("finish");

    assert_eq!(
        String::from_utf8(out).expect("utf8"),
        "1000 /dev/input/event1 3 53 450\n1010 /dev/input/event2 1 330 1\n"
    );
    assert_eq!(
        stats,
        RecordStats {
            seen: 2,
            filtered: 0,
            written: 2,
            first_ms: Some(1_000),
            last_ms: Some(1_010),
        }
    );
}

#[test]
fn filtered_events_are_neither_written_nor_timestamped() {
    let mut out = Vec::new();
    let mut sink = quiet_sink(&mut out, DeviceFilter::from_index(Some(1)));

    let dropped = sink
        .submit(ParsedEvent::new("/dev/input/event2", 3, 53, 450))
        .expect("submit");
    assert!(dropped.is_none());
    let kept = sink
        .submit(ParsedEvent::new("/dev/input/event1", 3, 54, 800))
        .expect("submit")
        .expect("kept event");
    // 被过滤的事件没有消耗时钟
    assert_eq!(kept.timestamp, Timestamp(1_000));

    let stats = sink.finish().expect("finish");
    assert_eq!(stats.filtered, 1);
    assert_eq!(stats.written, 1);
    assert_eq!(String::from_utf8(out).expect("utf8").lines().count(), 1);
}

#[test]
fn begin_fails_for_unwritable_path() {
    let dir = std::env::temp_dir().join(format!("adbrr-missing-{}", std::process::id()));
    let path = dir.join("no/such/dir/log.txt");
    let err = RecordingSink::begin(&path, DeviceFilter::Any)
        .err()
        .expect("open should fail");
    assert!(matches!(err, crate::error::Error::OpenLog { .. }));
}

#[test]
fn lines_are_on_disk_before_finish() {
    let path = std::env::temp_dir().join(format!(
        "adbrr-flush-{}-{:?}.log",
        std::process::id(),
        std::thread::current().id()
    ));
    let mut sink = RecordingSink::begin(&path, DeviceFilter::Any).expect("begin");
    sink.set_echo(false);
    sink.submit(ParsedEvent::new("/dev/input/event1", 0, 0, 0))
        .expect("submit");

    let on_disk = fs::read_to_string(&path).expect("read log");
    assert!(on_disk.ends_with(" /dev/input/event1 0 0 0\n"), "got {on_disk:?}");

    sink.finish().expect("finish");
    let _ = fs::remove_file(&path);
}
