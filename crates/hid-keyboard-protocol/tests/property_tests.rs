//! Property-based tests for the keyboard map.

use hid_keyboard_protocol::{
    HUL_CAPS_LOCK, HUL_NUM_LOCK, HUP_KEYBOARD, hid_to_key, keyboard_rules, keyboard_table,
};
use hidmap::codes::{EventType, KEY_A, KEY_LEFTSHIFT, LED_CAPSL, LED_NUML, LED_SCROLLL};
use hidmap::{
    DeviceInstance, EngineConfig, FieldKind, HidMapResult, InputEvent, RecordingSink, ReportField,
    Usage, UsagePage, UsageValue,
};
use insta::assert_snapshot;
use proptest::prelude::*;

fn attach(layout: &[ReportField]) -> HidMapResult<(DeviceInstance, RecordingSink)> {
    let mut sink = RecordingSink::new();
    let device =
        DeviceInstance::attach(keyboard_table()?, layout, &mut sink, &EngineConfig::default())?;
    Ok((device, sink))
}

fn key_field(id: u8) -> ReportField {
    ReportField::new(Usage::new(HUP_KEYBOARD, u16::from(id)), FieldKind::Absolute)
}

fn led_field(usage: u16) -> ReportField {
    ReportField::new(Usage::new(UsagePage::LEDS, usage), FieldKind::Absolute)
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    /// A mapped usage presses its key for any nonzero value and releases it
    /// for zero.
    #[test]
    fn prop_mapped_usage_presses_its_key(usage in any::<u8>(), value in -1i32..=1) {
        let Some(code) = hid_to_key(usage) else {
            return Ok(());
        };
        let field = key_field(usage);
        let (mut device, mut sink) = attach(&[field])
            .map_err(|e| TestCaseError::fail(e.to_string()))?;
        device.process_report(&[UsageValue::new(field.usage, field.kind, value)], &mut sink);
        prop_assert_eq!(sink.events(), &[InputEvent::Key { code, pressed: value != 0 }]);
    }

    /// Table lookup agrees with the conversion function for every usage.
    #[test]
    fn prop_table_matches_conversion(usage in any::<u8>()) {
        let table = keyboard_table().map_err(|e| TestCaseError::fail(e.to_string()))?;
        let found = table
            .lookup(Usage::new(HUP_KEYBOARD, u16::from(usage)), FieldKind::Absolute)
            .and_then(|rule| rule.kind.target_code());
        let expected = if usage < 0x04 { None } else { hid_to_key(usage) };
        prop_assert_eq!(found, expected);
    }
}

#[test]
fn attach_declares_repeat_once() -> HidMapResult<()> {
    let (mut device, mut sink) = attach(&[key_field(0x04), key_field(0xe1)])?;
    let caps = sink.capabilities();
    assert!(caps.has_event_type(EventType::Rep));
    assert!(caps.has_key(KEY_A));
    assert!(caps.has_key(KEY_LEFTSHIFT));
    assert!(!caps.has_event_type(EventType::Led));

    assert_eq!(device.reattach(&mut sink), 0);
    assert_eq!(sink.duplicate_declarations(), 0);
    Ok(())
}

#[test]
fn attach_declares_reported_leds() -> HidMapResult<()> {
    let layout = [key_field(0x04), led_field(HUL_NUM_LOCK), led_field(HUL_CAPS_LOCK)];
    let (mut device, mut sink) = attach(&layout)?;
    assert_eq!(device.entries().len(), 1);

    let caps = sink.capabilities();
    assert!(caps.has_event_type(EventType::Led));
    assert!(caps.has_led(LED_NUML));
    assert!(caps.has_led(LED_CAPSL));
    assert!(!caps.has_led(LED_SCROLLL));
    assert!(caps.has_event_type(EventType::Rep));

    assert_eq!(device.reattach(&mut sink), 0);
    assert_eq!(sink.duplicate_declarations(), 0);
    Ok(())
}

#[test]
fn report_end_emits_nothing() -> HidMapResult<()> {
    let (mut device, mut sink) = attach(&[key_field(0x04)])?;
    let summary = device.process_report(&[], &mut sink);
    assert_eq!(summary.emitted, 0);
    assert_eq!(summary.translated, 0);
    assert_eq!(summary.skipped, 1);
    assert_eq!(sink.batches().len(), 1);
    Ok(())
}

#[test]
fn keyboard_rule_count() {
    let rules = keyboard_rules();
    assert_snapshot!(
        format!("rules={} first={} last={}",
            rules.len(),
            rules.first().map(|r| r.usage.to_string()).unwrap_or_default(),
            rules.last().map(|r| r.usage.to_string()).unwrap_or_default()),
        @"rules=170 first=0007:0004 last=0007:00fb"
    );
}
