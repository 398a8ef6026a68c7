//! Usage identifiers and decoded report values

use core::fmt;

use serde::{Deserialize, Serialize};

/// HID usage page, the namespace a usage id lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsagePage(pub u16);

impl UsagePage {
    pub const GENERIC_DESKTOP: UsagePage = UsagePage(0x01);
    pub const KEYBOARD: UsagePage = UsagePage(0x07);
    pub const LEDS: UsagePage = UsagePage(0x08);
    pub const BUTTON: UsagePage = UsagePage(0x09);
    pub const CONSUMER: UsagePage = UsagePage(0x0C);
}

impl fmt::Display for UsagePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

/// A usage id scoped to its page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Usage {
    pub page: UsagePage,
    pub id: u16,
}

impl Usage {
    pub const fn new(page: UsagePage, id: u16) -> Self {
        Self { page, id }
    }

    /// Combined 32-bit form (`page << 16 | id`) as used in report descriptors.
    pub const fn extended(self) -> u32 {
        ((self.page.0 as u32) << 16) | self.id as u32
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04x}:{:04x}", self.page.0, self.id)
    }
}

/// Whether a report field carries absolute values or relative deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Absolute,
    Relative,
}

/// One field of a device's input report layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReportField {
    pub usage: Usage,
    pub kind: FieldKind,
}

impl ReportField {
    pub const fn new(usage: Usage, kind: FieldKind) -> Self {
        Self { usage, kind }
    }
}

/// A decoded value for one usage in one input report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageValue {
    pub usage: Usage,
    pub kind: FieldKind,
    pub value: i32,
}

impl UsageValue {
    pub const fn new(usage: Usage, kind: FieldKind, value: i32) -> Self {
        Self { usage, kind, value }
    }

    pub const fn field(&self) -> ReportField {
        ReportField::new(self.usage, self.kind)
    }
}

/// Top-level application collection identity used for driver matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopLevelCollection {
    pub page: UsagePage,
    pub usage: u16,
}

impl TopLevelCollection {
    pub const fn new(page: UsagePage, usage: u16) -> Self {
        Self { page, usage }
    }
}

impl fmt::Display for TopLevelCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TLC({:04x}:{:04x})", self.page.0, self.usage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_extended_form() {
        let usage = Usage::new(UsagePage::CONSUMER, 0x0e0);
        assert_eq!(usage.extended(), 0x000C_00E0);
    }

    #[test]
    fn test_usage_display() {
        let usage = Usage::new(UsagePage::CONSUMER, 0x238);
        assert_eq!(usage.to_string(), "000c:0238");
    }

    #[test]
    fn test_usage_value_field() {
        let usage = Usage::new(UsagePage::CONSUMER, 0x0e0);
        let value = UsageValue::new(usage, FieldKind::Relative, -2);
        assert_eq!(value.field(), ReportField::new(usage, FieldKind::Relative));
    }

    #[test]
    fn test_tlc_display() {
        let tlc = TopLevelCollection::new(UsagePage::CONSUMER, 0x0001);
        assert_eq!(tlc.to_string(), "TLC(000c:0001)");
    }
}
