//! Outbound interfaces toward the logical event device
//!
//! [`CapabilitySink`] is only used while a device attaches; [`EventSink`] is
//! only used while reports are processed. The engine calls [`EventSink::sync`]
//! once at the end of every report so the sink can publish the batch
//! atomically.

use serde::{Deserialize, Serialize};

use crate::capabilities::Capabilities;
use crate::codes::EventType;

/// Attach-time capability declaration. Declarations are idempotent.
pub trait CapabilitySink {
    fn declare_event_type(&mut self, event_type: EventType);

    fn declare_key(&mut self, code: u16);

    fn declare_abs_axis(&mut self, code: u16);

    fn declare_rel_axis(&mut self, code: u16);

    /// Declares an indicator the device can show. LEDs are driven toward
    /// the device, so no emission path exists for them.
    fn declare_led(&mut self, code: u16);
}

/// Runtime event emission.
pub trait EventSink {
    fn emit_key(&mut self, code: u16, pressed: bool);

    fn emit_abs(&mut self, code: u16, value: i32);

    fn emit_rel(&mut self, code: u16, delta: i32);

    /// Marks the end of one atomic batch.
    fn sync(&mut self);

    fn emit(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key { code, pressed } => self.emit_key(code, pressed),
            InputEvent::Abs { code, value } => self.emit_abs(code, value),
            InputEvent::Rel { code, delta } => self.emit_rel(code, delta),
        }
    }
}

/// A single logical input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    Key { code: u16, pressed: bool },
    Abs { code: u16, value: i32 },
    Rel { code: u16, delta: i32 },
}

impl InputEvent {
    pub fn event_type(&self) -> EventType {
        match self {
            InputEvent::Key { .. } => EventType::Key,
            InputEvent::Abs { .. } => EventType::Abs,
            InputEvent::Rel { .. } => EventType::Rel,
        }
    }

    pub fn code(&self) -> u16 {
        match *self {
            InputEvent::Key { code, .. }
            | InputEvent::Abs { code, .. }
            | InputEvent::Rel { code, .. } => code,
        }
    }
}

/// In-memory sink that records declarations, events and batches.
#[derive(Debug, Default)]
pub struct RecordingSink {
    capabilities: Capabilities,
    duplicate_declarations: usize,
    events: Vec<InputEvent>,
    pending: Vec<InputEvent>,
    batches: Vec<Vec<InputEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Declarations that repeated an earlier one.
    pub fn duplicate_declarations(&self) -> usize {
        self.duplicate_declarations
    }

    /// Every emitted event in order, synced or not.
    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }

    /// Batches closed by [`EventSink::sync`].
    pub fn batches(&self) -> &[Vec<InputEvent>] {
        &self.batches
    }

    /// Events emitted since the last sync.
    pub fn pending(&self) -> &[InputEvent] {
        &self.pending
    }

    /// Drops recorded events and batches, keeping declarations.
    pub fn clear_events(&mut self) {
        self.events.clear();
        self.pending.clear();
        self.batches.clear();
    }

    fn record_declaration(&mut self, fresh: bool) {
        if !fresh {
            self.duplicate_declarations += 1;
        }
    }

    fn record_event(&mut self, event: InputEvent) {
        self.events.push(event);
        self.pending.push(event);
    }
}

impl CapabilitySink for RecordingSink {
    fn declare_event_type(&mut self, event_type: EventType) {
        let fresh = self.capabilities.insert_event_type(event_type);
        self.record_declaration(fresh);
    }

    fn declare_key(&mut self, code: u16) {
        let fresh = self.capabilities.insert_key(code);
        self.record_declaration(fresh);
    }

    fn declare_abs_axis(&mut self, code: u16) {
        let fresh = self.capabilities.insert_abs(code);
        self.record_declaration(fresh);
    }

    fn declare_rel_axis(&mut self, code: u16) {
        let fresh = self.capabilities.insert_rel(code);
        self.record_declaration(fresh);
    }

    fn declare_led(&mut self, code: u16) {
        let fresh = self.capabilities.insert_led(code);
        self.record_declaration(fresh);
    }
}

impl EventSink for RecordingSink {
    fn emit_key(&mut self, code: u16, pressed: bool) {
        self.record_event(InputEvent::Key { code, pressed });
    }

    fn emit_abs(&mut self, code: u16, value: i32) {
        self.record_event(InputEvent::Abs { code, value });
    }

    fn emit_rel(&mut self, code: u16, delta: i32) {
        self.record_event(InputEvent::Rel { code, delta });
    }

    fn sync(&mut self) {
        let batch = std::mem::take(&mut self.pending);
        self.batches.push(batch);
    }
}
