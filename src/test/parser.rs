use crate::proto::{ParsedEvent, parse_event_line};

#[test]
fn parses_plain_getevent_line_as_decimal() {
    let ev = parse_event_line("/dev/input/event1: 0003 0035 000001c2").expect("event");
    assert_eq!(ev, ParsedEvent::new("/dev/input/event1", 3, 0x35, 0x1c2));
}

#[test]
fn tolerates_leading_diagnostic_text() {
    let ev = parse_event_line("[   12345.678901] /dev/input/event4: 0001 014a 00000001")
        .expect("event");
    assert_eq!(ev.device, "/dev/input/event4");
    assert_eq!((ev.ty, ev.code, ev.value), (1, 330, 1));
}

#[test]
fn full_width_value_is_not_sign_extended() {
    let ev = parse_event_line("/dev/input/event2: 0003 0039 ffffffff").expect("event");
    assert_eq!(ev.value, u32::MAX);
}

#[test]
fn strips_trailing_carriage_return() {
    let ev = parse_event_line("/dev/input/event0: 0000 0000 00000000\r").expect("event");
    assert_eq!(ev, ParsedEvent::new("/dev/input/event0", 0, 0, 0));
}

#[test]
fn non_event_lines_are_ignored() {
    let noise = [
        "",
        "   ",
        "add device 1: /dev/input/event3",
        "  name:     \"gpio-keys\"",
        "could not get driver version for /dev/input/mouse0, Not a typewriter",
        "/dev/input/event1: 0003 0035",
        "/dev/input/event1 0003 0035 000001c2",
        ": 0003 0035 000001c2",
        "/dev/input/event1: 0003 0035 000001c2 ",
        "/dev/input/event1: 0003 zz35 000001c2",
        "/dev/input/event1: 0003 -035 000001c2",
        "/dev/input/event1: 0003 0035 1ffffffff",
    ];
    for line in noise {
        assert_eq!(parse_event_line(line), None, "line {line:?} should be ignored");
    }
}

#[test]
fn every_hex_triplet_decodes_to_its_value() {
    for (ty, code, value) in [(0u32, 0u32, 0u32), (0x1, 0x74, 0x1), (0xff, 0xabcd, 0x7fffffff)] {
        let line = format!("/dev/input/event7: {ty:04x} {code:04x} {value:08x}");
        let ev = parse_event_line(&line).expect("event");
        assert_eq!((ev.ty, ev.code, ev.value), (ty, code, value));
    }
}
