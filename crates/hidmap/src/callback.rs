//! Custom translation rules
//!
//! A [`MapCallback`] runs in two phases. While a device attaches,
//! [`MapCallback::on_attach`] declares every capability the callback may
//! later emit. While reports are processed, [`MapCallback::on_value`]
//! receives the raw value together with the entry's private state and emits
//! zero or more events.
//!
//! Callbacks live in static tables shared by every device, so they hold no
//! per-device data themselves; anything that must persist between reports
//! goes into the [`CallbackState`] owned by the resolved entry.

use core::any::Any;
use core::fmt;

use crate::sink::{CapabilitySink, EventSink};
use crate::usage::ReportField;

/// Result of a runtime callback invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallbackStatus {
    /// Events were emitted for the value.
    Reported,
    /// The value carried no actionable change. Not an error.
    NoData,
}

/// Two-phase translation routine referenced from a [`crate::MapRule`].
pub trait MapCallback: Send + Sync + fmt::Debug {
    /// Stable name used by map descriptors and logs.
    fn name(&self) -> &'static str;

    /// Creates the private state of a freshly resolved entry.
    fn new_state(&self) -> CallbackState {
        CallbackState::empty()
    }

    /// Declares the capabilities this callback may emit.
    fn on_attach(&self, caps: &mut dyn CapabilitySink);

    /// Translates one raw value.
    fn on_value(
        &self,
        value: i32,
        state: &mut CallbackState,
        events: &mut dyn EventSink,
    ) -> CallbackStatus;
}

/// Callback run once per report after all usages have been translated.
pub trait ReportCallback: Send + Sync + fmt::Debug {
    fn name(&self) -> &'static str;

    /// Declares device-wide capabilities after every entry has attached.
    ///
    /// `layout` is every field the device reports, mapped or not.
    fn on_attach(&self, layout: &[ReportField], caps: &mut dyn CapabilitySink);

    fn on_report_end(&self, _events: &mut dyn EventSink) -> CallbackStatus {
        CallbackStatus::NoData
    }
}

/// Type-erased private state of one resolved callback entry.
#[derive(Default)]
pub struct CallbackState {
    inner: Option<Box<dyn Any + Send>>,
}

impl CallbackState {
    pub fn empty() -> Self {
        Self { inner: None }
    }

    pub fn with<T: Any + Send>(value: T) -> Self {
        Self {
            inner: Some(Box::new(value)),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_none()
    }

    pub fn get<T: Any + Send>(&self) -> Option<&T> {
        self.inner.as_ref().and_then(|b| b.downcast_ref::<T>())
    }

    pub fn get_mut<T: Any + Send>(&mut self) -> Option<&mut T> {
        self.inner.as_mut().and_then(|b| b.downcast_mut::<T>())
    }

    /// Replaces the stored state.
    pub fn insert<T: Any + Send>(&mut self, value: T) {
        self.inner = Some(Box::new(value));
    }

    pub fn clear(&mut self) {
        self.inner = None;
    }
}

impl fmt::Debug for CallbackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackState")
            .field("occupied", &self.inner.is_some())
            .finish()
    }
}
