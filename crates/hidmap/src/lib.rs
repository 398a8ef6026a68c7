//! Declarative HID usage to input event translation
//!
//! This crate turns decoded HID `(usage, value)` pairs into a normalized
//! stream of logical input events (keys, absolute axes, relative deltas).
//! A driver supplies a static [`MapTable`] of usage rules; the engine resolves
//! the rules against a device's report layout once at attach time and then
//! translates every incoming report.
//!
//! # Architecture
//!
//! - [`rule`]: the [`MapRule`] sum type (`Key`, `Absolute`, `Relative`, `Callback`)
//! - [`table`]: the validated, immutable [`MapTable`]
//! - [`callback`]: the two-phase [`MapCallback`] contract for custom rules
//! - [`device`]: per-device [`DeviceInstance`] holding the resolved entries
//! - [`sink`]: the outbound declaration and emission interfaces
//! - [`descriptor`]: JSON map assets compiled into tables
//!
//! # Example
//!
//! ```
//! use hidmap::codes::{KEY_MUTE, KEY_POWER};
//! use hidmap::{
//!     DeviceInstance, EngineConfig, FieldKind, MapRule, MapTable, RecordingSink, ReportField,
//!     TopLevelCollection, Usage, UsagePage, UsageValue,
//! };
//!
//! static RULES: &[MapRule] = &[
//!     MapRule::key(UsagePage::CONSUMER, 0x030, KEY_POWER),
//!     MapRule::key(UsagePage::CONSUMER, 0x0e2, KEY_MUTE),
//! ];
//!
//! let table = MapTable::new(
//!     TopLevelCollection::new(UsagePage::CONSUMER, 0x0001),
//!     "Consumer Control",
//!     RULES,
//! )?
//! .leak();
//!
//! let mute = Usage::new(UsagePage::CONSUMER, 0x0e2);
//! let mut sink = RecordingSink::new();
//! let mut device = DeviceInstance::attach(
//!     table,
//!     &[ReportField::new(mute, FieldKind::Absolute)],
//!     &mut sink,
//!     &EngineConfig::default(),
//! )?;
//!
//! device.process_report(&[UsageValue::new(mute, FieldKind::Absolute, 1)], &mut sink);
//! assert_eq!(sink.events().len(), 1);
//! # Ok::<(), hidmap::HidMapError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod callback;
pub mod capabilities;
pub mod codes;
pub mod config;
pub mod descriptor;
pub mod device;
pub mod error;
pub mod rule;
pub mod sink;
pub mod table;
pub mod usage;

pub use callback::{CallbackState, CallbackStatus, MapCallback, ReportCallback};
pub use capabilities::Capabilities;
pub use codes::EventType;
pub use config::EngineConfig;
pub use descriptor::{CallbackRegistry, MapDescriptor, RuleDescriptor};
pub use device::{DetachSummary, DeviceInstance, ReportSummary, ResolvedEntry};
pub use error::{HidMapError, HidMapResult};
pub use rule::{FieldMatch, MapRule, RuleKind};
pub use sink::{CapabilitySink, EventSink, InputEvent, RecordingSink};
pub use table::MapTable;
pub use usage::{FieldKind, ReportField, TopLevelCollection, Usage, UsagePage, UsageValue};
