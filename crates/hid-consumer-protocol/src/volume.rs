//! Relative volume emulation
//!
//! Some remotes report volume on the Consumer page as a relative control
//! rather than an absolute level. Event consumers only understand volume
//! keys, so every unit of the delta becomes one press/release pulse of
//! `KEY_VOLUMEUP` or `KEY_VOLUMEDOWN`.

use hidmap::codes::{EventType, KEY_VOLUMEDOWN, KEY_VOLUMEUP};
use hidmap::{CallbackState, CallbackStatus, CapabilitySink, EventSink, MapCallback};
use tracing::trace;

/// Registry name of [`RelVolume`].
pub const REL_VOLUME_CALLBACK: &str = "rel_volume";

/// Turns a relative volume delta into volume key pulses.
#[derive(Debug, Clone, Copy, Default)]
pub struct RelVolume;

pub static REL_VOLUME: RelVolume = RelVolume;

impl RelVolume {
    /// Key and pulse count for `delta`, or `None` when there is nothing to
    /// report.
    pub fn pulses(delta: i32) -> Option<(u16, u32)> {
        match delta {
            0 => None,
            d if d > 0 => Some((KEY_VOLUMEUP, d.unsigned_abs())),
            d => Some((KEY_VOLUMEDOWN, d.unsigned_abs())),
        }
    }
}

impl MapCallback for RelVolume {
    fn name(&self) -> &'static str {
        REL_VOLUME_CALLBACK
    }

    fn on_attach(&self, caps: &mut dyn CapabilitySink) {
        caps.declare_event_type(EventType::Key);
        caps.declare_key(KEY_VOLUMEUP);
        caps.declare_key(KEY_VOLUMEDOWN);
    }

    fn on_value(
        &self,
        value: i32,
        _state: &mut CallbackState,
        events: &mut dyn EventSink,
    ) -> CallbackStatus {
        let Some((code, count)) = Self::pulses(value) else {
            return CallbackStatus::NoData;
        };
        trace!(delta = value, code, count, "emulating relative volume");
        for _ in 0..count {
            events.emit_key(code, true);
            events.emit_key(code, false);
        }
        CallbackStatus::Reported
    }
}
