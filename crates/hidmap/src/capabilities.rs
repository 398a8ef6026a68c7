//! Declared capability bookkeeping

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::codes::EventType;
use crate::sink::InputEvent;

/// Set of event types and codes a device has announced it may emit.
///
/// Every `insert_*` method reports whether the declaration was new, which is
/// what keeps repeated attach passes invisible to the sink.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub event_types: BTreeSet<EventType>,
    pub keys: BTreeSet<u16>,
    pub abs_axes: BTreeSet<u16>,
    pub rel_axes: BTreeSet<u16>,
    #[serde(default)]
    pub leds: BTreeSet<u16>,
}

impl Capabilities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_event_type(&mut self, event_type: EventType) -> bool {
        self.event_types.insert(event_type)
    }

    pub fn insert_key(&mut self, code: u16) -> bool {
        self.keys.insert(code)
    }

    pub fn insert_abs(&mut self, code: u16) -> bool {
        self.abs_axes.insert(code)
    }

    pub fn insert_rel(&mut self, code: u16) -> bool {
        self.rel_axes.insert(code)
    }

    pub fn insert_led(&mut self, code: u16) -> bool {
        self.leds.insert(code)
    }

    pub fn has_event_type(&self, event_type: EventType) -> bool {
        self.event_types.contains(&event_type)
    }

    pub fn has_key(&self, code: u16) -> bool {
        self.keys.contains(&code)
    }

    pub fn has_abs(&self, code: u16) -> bool {
        self.abs_axes.contains(&code)
    }

    pub fn has_rel(&self, code: u16) -> bool {
        self.rel_axes.contains(&code)
    }

    pub fn has_led(&self, code: u16) -> bool {
        self.leds.contains(&code)
    }

    /// Whether an emission is covered by both its event type and its code.
    pub fn allows(&self, event: &InputEvent) -> bool {
        if !self.has_event_type(event.event_type()) {
            return false;
        }
        match *event {
            InputEvent::Key { code, .. } => self.has_key(code),
            InputEvent::Abs { code, .. } => self.has_abs(code),
            InputEvent::Rel { code, .. } => self.has_rel(code),
        }
    }

    pub fn merge(&mut self, other: &Capabilities) {
        self.event_types.extend(other.event_types.iter().copied());
        self.keys.extend(other.keys.iter().copied());
        self.abs_axes.extend(other.abs_axes.iter().copied());
        self.rel_axes.extend(other.rel_axes.iter().copied());
        self.leds.extend(other.leds.iter().copied());
    }

    pub fn is_empty(&self) -> bool {
        self.event_types.is_empty()
            && self.keys.is_empty()
            && self.abs_axes.is_empty()
            && self.rel_axes.is_empty()
            && self.leds.is_empty()
    }

    /// Number of declared codes, excluding event types.
    pub fn code_count(&self) -> usize {
        self.keys.len() + self.abs_axes.len() + self.rel_axes.len() + self.leds.len()
    }
}
