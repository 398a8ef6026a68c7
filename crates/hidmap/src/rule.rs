//! Mapping rule definitions
//!
//! Rules are plain `const` data so driver tables can be declared as
//! `static` slices:
//!
//! ```
//! use hidmap::codes::{ABS_VOLUME, KEY_MUTE};
//! use hidmap::{MapRule, UsagePage};
//!
//! static RULES: &[MapRule] = &[
//!     MapRule::key(UsagePage::CONSUMER, 0x0e2, KEY_MUTE),
//!     MapRule::abs(UsagePage::CONSUMER, 0x0e0, ABS_VOLUME),
//! ];
//! assert_eq!(RULES.len(), 2);
//! ```

use core::fmt;

use crate::callback::MapCallback;
use crate::usage::{FieldKind, Usage, UsagePage};

/// What a rule does with a matching value.
#[derive(Clone, Copy)]
pub enum RuleKind {
    /// Nonzero presses, zero releases.
    Key(u16),
    /// Value passed through as an axis position.
    Absolute(u16),
    /// Value passed through as a signed delta.
    Relative(u16),
    /// Custom two-phase translation.
    Callback(&'static dyn MapCallback),
}

impl RuleKind {
    /// Target code of direct rules.
    pub fn target_code(&self) -> Option<u16> {
        match *self {
            RuleKind::Key(code) | RuleKind::Absolute(code) | RuleKind::Relative(code) => {
                Some(code)
            }
            RuleKind::Callback(_) => None,
        }
    }

    pub fn is_callback(&self) -> bool {
        matches!(self, RuleKind::Callback(_))
    }
}

impl fmt::Debug for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Key(code) => write!(f, "Key({code:#x})"),
            RuleKind::Absolute(code) => write!(f, "Absolute({code:#x})"),
            RuleKind::Relative(code) => write!(f, "Relative({code:#x})"),
            RuleKind::Callback(cb) => write!(f, "Callback({})", cb.name()),
        }
    }
}

/// Which report field kinds a rule accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldMatch {
    Any,
    Absolute,
    Relative,
}

impl FieldMatch {
    pub fn accepts(self, kind: FieldKind) -> bool {
        match self {
            FieldMatch::Any => true,
            FieldMatch::Absolute => kind == FieldKind::Absolute,
            FieldMatch::Relative => kind == FieldKind::Relative,
        }
    }

    /// Whether some field kind is accepted by both selectors.
    pub fn overlaps(self, other: FieldMatch) -> bool {
        [FieldKind::Absolute, FieldKind::Relative]
            .into_iter()
            .any(|kind| self.accepts(kind) && other.accepts(kind))
    }
}

/// One table entry: a usage, the field kinds it applies to and its rule.
#[derive(Debug, Clone, Copy)]
pub struct MapRule {
    pub usage: Usage,
    pub kind: RuleKind,
    pub field: FieldMatch,
}

impl MapRule {
    pub const fn key(page: UsagePage, usage: u16, code: u16) -> Self {
        Self {
            usage: Usage::new(page, usage),
            kind: RuleKind::Key(code),
            field: FieldMatch::Any,
        }
    }

    pub const fn abs(page: UsagePage, usage: u16, code: u16) -> Self {
        Self {
            usage: Usage::new(page, usage),
            kind: RuleKind::Absolute(code),
            field: FieldMatch::Absolute,
        }
    }

    pub const fn rel(page: UsagePage, usage: u16, code: u16) -> Self {
        Self {
            usage: Usage::new(page, usage),
            kind: RuleKind::Relative(code),
            field: FieldMatch::Relative,
        }
    }

    /// Callback rule applying to any field kind.
    pub const fn callback(page: UsagePage, usage: u16, cb: &'static dyn MapCallback) -> Self {
        Self {
            usage: Usage::new(page, usage),
            kind: RuleKind::Callback(cb),
            field: FieldMatch::Any,
        }
    }

    /// Callback rule applying to absolute fields only.
    pub const fn abs_callback(page: UsagePage, usage: u16, cb: &'static dyn MapCallback) -> Self {
        Self {
            usage: Usage::new(page, usage),
            kind: RuleKind::Callback(cb),
            field: FieldMatch::Absolute,
        }
    }

    /// Callback rule applying to relative fields only.
    pub const fn rel_callback(page: UsagePage, usage: u16, cb: &'static dyn MapCallback) -> Self {
        Self {
            usage: Usage::new(page, usage),
            kind: RuleKind::Callback(cb),
            field: FieldMatch::Relative,
        }
    }

    pub fn applies_to(&self, usage: Usage, kind: FieldKind) -> bool {
        self.usage == usage && self.field.accepts(kind)
    }
}
