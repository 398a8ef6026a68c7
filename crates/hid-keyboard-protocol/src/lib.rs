//! HID keyboard map
//!
//! Maps every Keyboard page (0x07) usage with a standard key code and adds a
//! report-level callback that marks the device for software key repeat and
//! declares the lock LEDs the device reports.
//! Keyboards are matched on their Generic Desktop collection while their
//! keys live on the Keyboard page, so the table is built with
//! [`MapTable::with_page`].

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod usage_map;

pub use usage_map::hid_to_key;

use std::sync::OnceLock;

use hidmap::codes::{EventType, LED_CAPSL, LED_NUML, LED_SCROLLL};
use hidmap::{
    CapabilitySink, HidMapResult, MapRule, MapTable, ReportCallback, ReportField,
    TopLevelCollection, Usage, UsagePage,
};
use tracing::debug;

pub const HUP_KEYBOARD: UsagePage = UsagePage::KEYBOARD;
pub const HUG_KEYBOARD: u16 = 0x0006;

pub const KEYBOARD_TLC: TopLevelCollection =
    TopLevelCollection::new(UsagePage::GENERIC_DESKTOP, HUG_KEYBOARD);

pub const KEYBOARD_DESCRIPTION: &str = "Simple Keyboard";

/// First usage that can carry a key; 0x00-0x03 are error indications.
pub const FIRST_KEY_USAGE: u8 = 0x04;

// LED page (0x08) usages
pub const HUL_NUM_LOCK: u16 = 0x0001;
pub const HUL_CAPS_LOCK: u16 = 0x0002;
pub const HUL_SCROLL_LOCK: u16 = 0x0003;

/// Keyboard LED usages and the indicator code each one drives.
pub const KEYBOARD_LEDS: [(u16, u16); 3] = [
    (HUL_NUM_LOCK, LED_NUML),
    (HUL_CAPS_LOCK, LED_CAPSL),
    (HUL_SCROLL_LOCK, LED_SCROLLL),
];

/// Declares key repeat for the whole device, plus one indicator for every
/// lock LED the device reports. Repeat itself is generated by the event
/// consumer, so nothing happens per report.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoftRepeat;

pub static SOFT_REPEAT: SoftRepeat = SoftRepeat;

impl ReportCallback for SoftRepeat {
    fn name(&self) -> &'static str {
        "soft_repeat"
    }

    fn on_attach(&self, layout: &[ReportField], caps: &mut dyn CapabilitySink) {
        let reported = |id: u16| layout.iter().any(|f| f.usage == Usage::new(UsagePage::LEDS, id));
        if KEYBOARD_LEDS.iter().any(|&(id, _)| reported(id)) {
            caps.declare_event_type(EventType::Led);
        }
        for (id, code) in KEYBOARD_LEDS {
            if reported(id) {
                caps.declare_led(code);
            }
        }
        caps.declare_event_type(EventType::Rep);
    }
}

/// Key rules for every mapped Keyboard page usage, in usage order.
pub fn keyboard_rules() -> Vec<MapRule> {
    (FIRST_KEY_USAGE..=u8::MAX)
        .filter_map(|usage| {
            hid_to_key(usage).map(|code| MapRule::key(HUP_KEYBOARD, u16::from(usage), code))
        })
        .collect()
}

pub fn build_keyboard_table() -> HidMapResult<MapTable> {
    let table = MapTable::with_page(
        KEYBOARD_TLC,
        HUP_KEYBOARD,
        KEYBOARD_DESCRIPTION,
        &keyboard_rules(),
    )?;
    Ok(table.with_final_callback(&SOFT_REPEAT))
}

static KEYBOARD_TABLE: OnceLock<MapTable> = OnceLock::new();

/// Shared keyboard table, validated on first use.
pub fn keyboard_table() -> HidMapResult<&'static MapTable> {
    if let Some(table) = KEYBOARD_TABLE.get() {
        return Ok(table);
    }
    let table = build_keyboard_table()?;
    debug!(rules = table.len(), "keyboard table validated");
    Ok(KEYBOARD_TABLE.get_or_init(|| table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hidmap::{FieldKind, RecordingSink};

    #[test]
    fn test_rules_skip_unmapped_usages() {
        let rules = keyboard_rules();
        assert!(rules.iter().all(|r| r.usage.id >= u16::from(FIRST_KEY_USAGE)));
        assert!(rules.iter().all(|r| r.usage.page == HUP_KEYBOARD));
        assert!(!rules.iter().any(|r| r.usage.id == 0xa0));
    }

    #[test]
    fn test_table_identity_and_page() -> HidMapResult<()> {
        let table = keyboard_table()?;
        assert!(table.matches(KEYBOARD_TLC));
        assert_eq!(table.usage_page(), HUP_KEYBOARD);
        assert_eq!(table.final_callback().map(|cb| cb.name()), Some("soft_repeat"));
        Ok(())
    }

    fn led_field(usage: u16) -> ReportField {
        ReportField::new(Usage::new(UsagePage::LEDS, usage), FieldKind::Absolute)
    }

    #[test]
    fn test_soft_repeat_without_leds_declares_rep_only() {
        let mut sink = RecordingSink::new();
        let layout = [ReportField::new(Usage::new(HUP_KEYBOARD, 0x04), FieldKind::Absolute)];
        SOFT_REPEAT.on_attach(&layout, &mut sink);
        assert!(sink.capabilities().has_event_type(EventType::Rep));
        assert!(!sink.capabilities().has_event_type(EventType::Led));
        assert_eq!(sink.capabilities().code_count(), 0);
    }

    #[test]
    fn test_soft_repeat_declares_present_leds() {
        let mut sink = RecordingSink::new();
        let layout = [led_field(HUL_NUM_LOCK), led_field(HUL_SCROLL_LOCK), led_field(0x4b)];
        SOFT_REPEAT.on_attach(&layout, &mut sink);
        let caps = sink.capabilities();
        assert!(caps.has_event_type(EventType::Rep));
        assert!(caps.has_event_type(EventType::Led));
        assert!(caps.has_led(LED_NUML));
        assert!(caps.has_led(LED_SCROLLL));
        assert!(!caps.has_led(LED_CAPSL));
        assert_eq!(caps.code_count(), 2);
        assert_eq!(sink.duplicate_declarations(), 0);
    }
}
