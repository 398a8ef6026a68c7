//! Property-based tests for rule dispatch.
//!
//! Covers the direct transfer functions, table lookup purity, partial
//! coverage of device reports and the declared-before-emitted ordering.

use std::sync::LazyLock;

use hidmap::codes::{ABS_VOLUME, KEY_MUTE, KEY_POWER, KEY_SLEEP, REL_HWHEEL};
use hidmap::{
    DeviceInstance, EngineConfig, FieldKind, InputEvent, MapRule, MapTable, RecordingSink,
    ReportField, TopLevelCollection, Usage, UsagePage, UsageValue,
};
use proptest::prelude::*;

const PAGE: UsagePage = UsagePage::CONSUMER;

static RULES: &[MapRule] = &[
    MapRule::key(PAGE, 0x030, KEY_POWER),
    MapRule::key(PAGE, 0x032, KEY_SLEEP),
    MapRule::key(PAGE, 0x0e2, KEY_MUTE),
    MapRule::abs(PAGE, 0x0e0, ABS_VOLUME),
    MapRule::rel(PAGE, 0x238, REL_HWHEEL),
];

static TABLE: LazyLock<Option<MapTable>> = LazyLock::new(|| {
    MapTable::new(TopLevelCollection::new(PAGE, 0x0001), "Consumer Control", RULES).ok()
});

fn table() -> &'static MapTable {
    match TABLE.as_ref() {
        Some(table) => table,
        None => panic!("property table must validate"),
    }
}

fn kind_for(rule: &MapRule) -> FieldKind {
    match rule.field {
        hidmap::FieldMatch::Relative => FieldKind::Relative,
        _ => FieldKind::Absolute,
    }
}

/// Position in `RULES` of the rule `lookup` returns, if any.
fn lookup_position(id: u16, relative: bool) -> Option<usize> {
    let kind = if relative {
        FieldKind::Relative
    } else {
        FieldKind::Absolute
    };
    let hit = table().lookup(Usage::new(PAGE, id), kind)?;
    RULES
        .iter()
        .position(|r| r.usage == hit.usage && r.field == hit.field)
}

fn attach_all() -> (DeviceInstance, RecordingSink) {
    let layout: Vec<ReportField> = RULES
        .iter()
        .map(|rule| ReportField::new(rule.usage, kind_for(rule)))
        .collect();
    let mut sink = RecordingSink::new();
    match DeviceInstance::attach(table(), &layout, &mut sink, &EngineConfig::default()) {
        Ok(device) => (device, sink),
        Err(e) => panic!("attach failed: {e}"),
    }
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(500))]

    /// Every key rule emits exactly one event: release for zero, press otherwise.
    #[test]
    fn prop_key_rules_emit_one_press_or_release(rule_index in 0usize..3, value: i32) {
        let rule = RULES[rule_index];
        let (mut device, mut sink) = attach_all();
        let summary = device.process_report(
            &[UsageValue::new(rule.usage, FieldKind::Absolute, value)],
            &mut sink,
        );

        prop_assert_eq!(summary.emitted, 1);
        let code = rule.kind.target_code().unwrap_or_default();
        prop_assert_eq!(sink.events(), &[InputEvent::Key { code, pressed: value != 0 }]);
    }

    /// Absolute rules pass the raw value through unchanged.
    #[test]
    fn prop_abs_rule_passes_value_through(value: i32) {
        let (mut device, mut sink) = attach_all();
        device.process_report(
            &[UsageValue::new(Usage::new(PAGE, 0x0e0), FieldKind::Absolute, value)],
            &mut sink,
        );
        prop_assert_eq!(sink.events(), &[InputEvent::Abs { code: ABS_VOLUME, value }]);
    }

    /// Relative rules pass the raw delta through unchanged.
    #[test]
    fn prop_rel_rule_passes_delta_through(delta: i32) {
        let (mut device, mut sink) = attach_all();
        device.process_report(
            &[UsageValue::new(Usage::new(PAGE, 0x238), FieldKind::Relative, delta)],
            &mut sink,
        );
        prop_assert_eq!(sink.events(), &[InputEvent::Rel { code: REL_HWHEEL, delta }]);
    }

    /// Lookup depends only on (usage, field kind), not on earlier queries.
    #[test]
    fn prop_lookup_is_pure(
        queries in proptest::collection::vec((0x000u16..0x300, any::<bool>()), 1..64),
    ) {
        let first: Vec<Option<usize>> = queries
            .iter()
            .map(|&(id, relative)| lookup_position(id, relative))
            .collect();

        let (_device, _sink) = attach_all();

        let second: Vec<Option<usize>> = queries
            .iter()
            .rev()
            .map(|&(id, relative)| lookup_position(id, relative))
            .collect();

        let reversed: Vec<Option<usize>> = second.into_iter().rev().collect();
        prop_assert_eq!(first, reversed);
    }

    /// Nothing reaches the sink for a code the device did not declare.
    #[test]
    fn prop_emissions_are_declared(
        values in proptest::collection::vec((0usize..5, any::<i32>()), 0..32),
    ) {
        let (mut device, mut sink) = attach_all();
        let report: Vec<UsageValue> = values
            .iter()
            .map(|&(i, v)| {
                let rule = RULES[i];
                UsageValue::new(rule.usage, kind_for(&rule), v)
            })
            .collect();
        device.process_report(&report, &mut sink);

        for event in sink.events() {
            prop_assert!(sink.capabilities().allows(event), "undeclared event {:?}", event);
        }
    }
}

#[test]
fn unmapped_usage_produces_nothing() {
    let mapped = ReportField::new(Usage::new(PAGE, 0x0e2), FieldKind::Absolute);
    let unmapped = ReportField::new(Usage::new(PAGE, 0x0e9), FieldKind::Absolute);
    let mut sink = RecordingSink::new();
    let mut device = match DeviceInstance::attach(
        table(),
        &[mapped, unmapped],
        &mut sink,
        &EngineConfig::default(),
    ) {
        Ok(device) => device,
        Err(e) => panic!("attach failed: {e}"),
    };

    let summary = device.process_report(
        &[
            UsageValue::new(unmapped.usage, unmapped.kind, 1),
            UsageValue::new(mapped.usage, mapped.kind, 1),
        ],
        &mut sink,
    );

    assert_eq!(summary.unmapped, 1);
    assert_eq!(summary.translated, 1);
    assert_eq!(
        sink.events(),
        &[InputEvent::Key {
            code: KEY_MUTE,
            pressed: true
        }]
    );
}

#[test]
fn one_batch_per_report() {
    let (mut device, mut sink) = attach_all();
    device.process_report(&[], &mut sink);
    device.process_report(
        &[UsageValue::new(Usage::new(PAGE, 0x030), FieldKind::Absolute, 1)],
        &mut sink,
    );
    assert_eq!(sink.batches().len(), 2);
    assert!(sink.batches()[0].is_empty());
    assert_eq!(sink.batches()[1].len(), 1);
    assert_eq!(device.reports_processed(), 2);
}
