//! HID Consumer Control map
//!
//! This crate provides the mapping table for the HID Consumer page (0x0C):
//! power and sleep buttons, media transport, volume, brightness, keyboard
//! illumination, application launch and application control keys.
//!
//! ## Features
//! - Static [`CONSUMER_RULES`] table covering every usage with a known event
//! - Absolute volume reported as `ABS_VOLUME`
//! - Relative volume emulated with volume key pulses ([`RelVolume`])
//! - AC Pan reported as horizontal wheel
//!
//! ```
//! use hid_consumer_protocol::{CONSUMER_CONTROL_TLC, consumer_table};
//!
//! let table = consumer_table()?;
//! assert!(table.matches(CONSUMER_CONTROL_TLC));
//! # Ok::<(), hidmap::HidMapError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod map;
pub mod volume;

pub use map::CONSUMER_RULES;
pub use volume::{REL_VOLUME, REL_VOLUME_CALLBACK, RelVolume};

use std::sync::OnceLock;

use hidmap::{CallbackRegistry, HidMapResult, MapTable, TopLevelCollection, UsagePage};
use tracing::debug;

pub const HUP_CONSUMER: UsagePage = UsagePage::CONSUMER;
pub const HUC_CONSUMER_CONTROL: u16 = 0x0001;

/// Collection a consumer control device must expose.
pub const CONSUMER_CONTROL_TLC: TopLevelCollection =
    TopLevelCollection::new(HUP_CONSUMER, HUC_CONSUMER_CONTROL);

pub const CONSUMER_DESCRIPTION: &str = "Consumer Control";

static CONSUMER_TABLE: OnceLock<MapTable> = OnceLock::new();

/// Validates [`CONSUMER_RULES`] into a fresh table.
pub fn build_consumer_table() -> HidMapResult<MapTable> {
    MapTable::new(CONSUMER_CONTROL_TLC, CONSUMER_DESCRIPTION, CONSUMER_RULES)
}

/// Shared consumer table, validated on first use.
pub fn consumer_table() -> HidMapResult<&'static MapTable> {
    if let Some(table) = CONSUMER_TABLE.get() {
        return Ok(table);
    }
    let table = build_consumer_table()?;
    debug!(rules = table.len(), "consumer table validated");
    Ok(CONSUMER_TABLE.get_or_init(|| table))
}

/// Callbacks this crate offers to map descriptors.
pub fn callback_registry() -> CallbackRegistry {
    let mut registry = CallbackRegistry::new();
    registry.register(&REL_VOLUME);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(HUP_CONSUMER, UsagePage(0x0c));
        assert_eq!(HUC_CONSUMER_CONTROL, 0x0001);
        assert_eq!(CONSUMER_CONTROL_TLC.page, HUP_CONSUMER);
    }

    #[test]
    fn test_table_is_shared() -> HidMapResult<()> {
        let first = consumer_table()?;
        let second = consumer_table()?;
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.len(), CONSUMER_RULES.len());
        assert_eq!(first.description(), CONSUMER_DESCRIPTION);
        Ok(())
    }

    #[test]
    fn test_registry_has_rel_volume() {
        let registry = callback_registry();
        assert_eq!(registry.len(), 1);
        assert!(registry.get(REL_VOLUME_CALLBACK).is_some());
    }
}
