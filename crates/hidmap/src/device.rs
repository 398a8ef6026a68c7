//! Per-device dispatch
//!
//! A [`DeviceInstance`] binds a static [`MapTable`] to the fields one device
//! actually reports. [`DeviceInstance::attach`] resolves every field against
//! the table and declares capabilities; [`DeviceInstance::process_report`]
//! translates decoded values afterwards. Translation needs `&mut self`, so a
//! device is driven by one context at a time.

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::callback::{CallbackState, CallbackStatus};
use crate::capabilities::Capabilities;
use crate::codes::EventType;
use crate::config::EngineConfig;
use crate::error::{HidMapError, HidMapResult};
use crate::rule::{MapRule, RuleKind};
use crate::sink::{CapabilitySink, EventSink, InputEvent};
use crate::table::MapTable;
use crate::usage::{ReportField, Usage, UsageValue};

/// A table rule bound to a field present in the device report.
#[derive(Debug)]
pub struct ResolvedEntry {
    field: ReportField,
    rule: MapRule,
    state: CallbackState,
    declared: Capabilities,
}

impl ResolvedEntry {
    fn new(field: ReportField, rule: MapRule) -> Self {
        let state = match rule.kind {
            RuleKind::Callback(cb) => cb.new_state(),
            _ => CallbackState::empty(),
        };
        Self {
            field,
            rule,
            state,
            declared: Capabilities::new(),
        }
    }

    pub fn field(&self) -> ReportField {
        self.field
    }

    pub fn rule(&self) -> &MapRule {
        &self.rule
    }

    pub fn state(&self) -> &CallbackState {
        &self.state
    }

    /// Capabilities this entry declared while attaching.
    pub fn declared(&self) -> &Capabilities {
        &self.declared
    }

    fn attach(&mut self, outer: &mut dyn CapabilitySink, device: &mut Capabilities) -> usize {
        let mut recorder = DeclareRecorder {
            outer,
            device,
            entry: &mut self.declared,
            forwarded: 0,
        };
        match self.rule.kind {
            RuleKind::Key(code) => {
                recorder.declare_event_type(EventType::Key);
                recorder.declare_key(code);
            }
            RuleKind::Absolute(code) => {
                recorder.declare_event_type(EventType::Abs);
                recorder.declare_abs_axis(code);
            }
            RuleKind::Relative(code) => {
                recorder.declare_event_type(EventType::Rel);
                recorder.declare_rel_axis(code);
            }
            RuleKind::Callback(cb) => cb.on_attach(&mut recorder),
        }
        recorder.forwarded
    }

    fn translate(&mut self, value: i32, events: &mut dyn EventSink) -> CallbackStatus {
        match self.rule.kind {
            RuleKind::Key(code) => events.emit_key(code, value != 0),
            RuleKind::Absolute(code) => events.emit_abs(code, value),
            RuleKind::Relative(code) => events.emit_rel(code, value),
            RuleKind::Callback(cb) => return cb.on_value(value, &mut self.state, events),
        }
        CallbackStatus::Reported
    }
}

/// Counters for one processed report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    /// Values in the report.
    pub values: usize,
    /// Values that produced events, plus one when the table's final
    /// callback reported.
    pub translated: usize,
    /// Values a callback reported as carrying no change, plus one when the
    /// final callback had nothing to report.
    pub skipped: usize,
    /// Values without a resolved entry.
    pub unmapped: usize,
    /// Events forwarded to the sink.
    pub emitted: usize,
    /// Events dropped for lack of a declaration.
    pub dropped: usize,
}

/// What a detach released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetachSummary {
    pub entries: usize,
    pub reports_processed: u64,
}

/// One attached device and its resolved entries.
#[derive(Debug)]
pub struct DeviceInstance {
    table: &'static MapTable,
    config: EngineConfig,
    entries: Vec<ResolvedEntry>,
    index: HashMap<ReportField, usize>,
    layout: Vec<ReportField>,
    capabilities: Capabilities,
    reports_processed: u64,
}

impl DeviceInstance {
    /// Resolves `layout` against `table` and declares capabilities.
    ///
    /// Fields without a rule are skipped. Fails with
    /// [`HidMapError::NoUsagesMatched`] when no field resolves at all.
    pub fn attach(
        table: &'static MapTable,
        layout: &[ReportField],
        sink: &mut dyn CapabilitySink,
        config: &EngineConfig,
    ) -> HidMapResult<Self> {
        config.validate()?;

        let mut capabilities = Capabilities::new();
        let mut entries: Vec<ResolvedEntry> = Vec::new();
        let mut index = HashMap::new();

        for field in layout {
            if index.contains_key(field) {
                continue;
            }
            let Some(rule) = table.lookup(field.usage, field.kind) else {
                if config.verbose(5) {
                    trace!(usage = %field.usage, kind = ?field.kind, "no rule for usage");
                }
                continue;
            };

            let mut entry = ResolvedEntry::new(*field, *rule);
            entry.attach(sink, &mut capabilities);
            if config.verbose(5) {
                trace!(usage = %field.usage, rule = ?rule.kind, "resolved entry");
            }
            index.insert(*field, entries.len());
            entries.push(entry);
        }

        if entries.is_empty() {
            return Err(HidMapError::NoUsagesMatched {
                description: table.description().to_string(),
                identity: table.identity(),
            });
        }

        attach_final(table, layout, sink, &mut capabilities);

        if config.verbose(1) {
            debug!(
                description = table.description(),
                entries = entries.len(),
                keys = capabilities.keys.len(),
                abs_axes = capabilities.abs_axes.len(),
                rel_axes = capabilities.rel_axes.len(),
                leds = capabilities.leds.len(),
                "device attached"
            );
        }

        Ok(Self {
            table,
            config: config.clone(),
            entries,
            index,
            layout: layout.to_vec(),
            capabilities,
            reports_processed: 0,
        })
    }

    /// Runs the attach phase again for every entry.
    ///
    /// Returns the number of declarations that reached the sink, which is
    /// zero when nothing changed since the first attach.
    pub fn reattach(&mut self, sink: &mut dyn CapabilitySink) -> usize {
        let mut forwarded = 0;
        for entry in &mut self.entries {
            forwarded += entry.attach(sink, &mut self.capabilities);
        }
        forwarded += attach_final(self.table, &self.layout, sink, &mut self.capabilities);
        forwarded
    }

    /// Translates one decoded report and closes it as one batch.
    pub fn process_report(
        &mut self,
        report: &[UsageValue],
        sink: &mut dyn EventSink,
    ) -> ReportSummary {
        let mut summary = ReportSummary {
            values: report.len(),
            ..ReportSummary::default()
        };
        let verbose = self.config.verbose(5);
        let mut guard = GuardedSink {
            inner: sink,
            allowed: &self.capabilities,
            source: None,
            emitted: 0,
            dropped: 0,
        };

        for value in report {
            let entry = self
                .index
                .get(&value.field())
                .and_then(|&i| self.entries.get_mut(i));
            let Some(entry) = entry else {
                summary.unmapped += 1;
                if verbose {
                    trace!(usage = %value.usage, value = value.value, "unmapped value ignored");
                }
                continue;
            };

            guard.source = Some(value.usage);
            match entry.translate(value.value, &mut guard) {
                CallbackStatus::Reported => summary.translated += 1,
                CallbackStatus::NoData => summary.skipped += 1,
            }
            if verbose {
                trace!(usage = %value.usage, value = value.value, "translated value");
            }
        }

        if let Some(cb) = self.table.final_callback() {
            guard.source = None;
            match cb.on_report_end(&mut guard) {
                CallbackStatus::Reported => summary.translated += 1,
                CallbackStatus::NoData => summary.skipped += 1,
            }
        }

        summary.emitted = guard.emitted;
        summary.dropped = guard.dropped;
        guard.inner.sync();
        self.reports_processed += 1;
        summary
    }

    /// Releases every entry and its private state.
    pub fn detach(self) -> DetachSummary {
        let summary = DetachSummary {
            entries: self.entries.len(),
            reports_processed: self.reports_processed,
        };
        if self.config.verbose(1) {
            debug!(
                description = self.table.description(),
                entries = summary.entries,
                reports = summary.reports_processed,
                "device detached"
            );
        }
        summary
    }

    pub fn table(&self) -> &'static MapTable {
        self.table
    }

    pub fn description(&self) -> &str {
        self.table.description()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn entries(&self) -> &[ResolvedEntry] {
        &self.entries
    }

    pub fn entry(&self, field: ReportField) -> Option<&ResolvedEntry> {
        self.index.get(&field).and_then(|&i| self.entries.get(i))
    }

    /// Union of everything declared for this device.
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    pub fn reports_processed(&self) -> u64 {
        self.reports_processed
    }
}

/// Runs the table's final callback attach pass over the full layout.
fn attach_final(
    table: &MapTable,
    layout: &[ReportField],
    outer: &mut dyn CapabilitySink,
    device: &mut Capabilities,
) -> usize {
    let Some(cb) = table.final_callback() else {
        return 0;
    };
    let mut declared = Capabilities::new();
    let mut recorder = DeclareRecorder {
        outer,
        device,
        entry: &mut declared,
        forwarded: 0,
    };
    cb.on_attach(layout, &mut recorder);
    recorder.forwarded
}

/// Records declarations per entry and forwards each one to the outer sink
/// only the first time the device declares it.
struct DeclareRecorder<'a> {
    outer: &'a mut dyn CapabilitySink,
    device: &'a mut Capabilities,
    entry: &'a mut Capabilities,
    forwarded: usize,
}

impl CapabilitySink for DeclareRecorder<'_> {
    fn declare_event_type(&mut self, event_type: EventType) {
        self.entry.insert_event_type(event_type);
        if self.device.insert_event_type(event_type) {
            self.outer.declare_event_type(event_type);
            self.forwarded += 1;
        }
    }

    fn declare_key(&mut self, code: u16) {
        self.entry.insert_key(code);
        if self.device.insert_key(code) {
            self.outer.declare_key(code);
            self.forwarded += 1;
        }
    }

    fn declare_abs_axis(&mut self, code: u16) {
        self.entry.insert_abs(code);
        if self.device.insert_abs(code) {
            self.outer.declare_abs_axis(code);
            self.forwarded += 1;
        }
    }

    fn declare_rel_axis(&mut self, code: u16) {
        self.entry.insert_rel(code);
        if self.device.insert_rel(code) {
            self.outer.declare_rel_axis(code);
            self.forwarded += 1;
        }
    }

    fn declare_led(&mut self, code: u16) {
        self.entry.insert_led(code);
        if self.device.insert_led(code) {
            self.outer.declare_led(code);
            self.forwarded += 1;
        }
    }
}

/// Emission path for one report. Checks every event against the device's
/// declarations; batches are closed by the engine, not by callbacks.
struct GuardedSink<'a> {
    inner: &'a mut dyn EventSink,
    allowed: &'a Capabilities,
    source: Option<Usage>,
    emitted: usize,
    dropped: usize,
}

impl GuardedSink<'_> {
    fn forward(&mut self, event: InputEvent) {
        if !self.allowed.allows(&event) {
            warn!(
                usage = ?self.source,
                event = ?event,
                "dropping emission for undeclared capability"
            );
            self.dropped += 1;
            return;
        }
        self.emitted += 1;
        self.inner.emit(event);
    }
}

impl EventSink for GuardedSink<'_> {
    fn emit_key(&mut self, code: u16, pressed: bool) {
        self.forward(InputEvent::Key { code, pressed });
    }

    fn emit_abs(&mut self, code: u16, value: i32) {
        self.forward(InputEvent::Abs { code, value });
    }

    fn emit_rel(&mut self, code: u16, delta: i32) {
        self.forward(InputEvent::Rel { code, delta });
    }

    fn sync(&mut self) {}
}
