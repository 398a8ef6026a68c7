//! Validated, immutable mapping tables

use core::fmt;

use crate::callback::ReportCallback;
use crate::codes::{ABS_MAX, EventType, KEY_MAX, KEY_RESERVED, REL_MAX};
use crate::error::{HidMapError, HidMapResult};
use crate::rule::{MapRule, RuleKind};
use crate::usage::{FieldKind, TopLevelCollection, Usage, UsagePage};

/// An ordered set of rules for one usage page.
///
/// Construction validates every rule; once built the table never changes and
/// can be shared between any number of devices.
pub struct MapTable {
    identity: TopLevelCollection,
    page: UsagePage,
    description: String,
    rules: Vec<MapRule>,
    final_callback: Option<&'static dyn ReportCallback>,
}

impl MapTable {
    /// Builds a table for the usage page of `identity`.
    pub fn new(
        identity: TopLevelCollection,
        description: impl Into<String>,
        rules: &[MapRule],
    ) -> HidMapResult<Self> {
        Self::with_page(identity, identity.page, description, rules)
    }

    /// Builds a table whose rules live on a different page than the
    /// collection used for matching (a keyboard collection sits on the
    /// Generic Desktop page while its keys use the Keyboard page).
    pub fn with_page(
        identity: TopLevelCollection,
        page: UsagePage,
        description: impl Into<String>,
        rules: &[MapRule],
    ) -> HidMapResult<Self> {
        validate_rules(page, rules)?;
        Ok(Self {
            identity,
            page,
            description: description.into(),
            rules: rules.to_vec(),
            final_callback: None,
        })
    }

    pub fn with_final_callback(mut self, callback: &'static dyn ReportCallback) -> Self {
        self.final_callback = Some(callback);
        self
    }

    /// Moves the table into static storage for use by device instances.
    pub fn leak(self) -> &'static MapTable {
        Box::leak(Box::new(self))
    }

    pub fn identity(&self) -> TopLevelCollection {
        self.identity
    }

    pub fn usage_page(&self) -> UsagePage {
        self.page
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn rules(&self) -> &[MapRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn final_callback(&self) -> Option<&'static dyn ReportCallback> {
        self.final_callback
    }

    /// Device class matcher used by the enumeration layer.
    pub fn matches(&self, tlc: TopLevelCollection) -> bool {
        self.identity == tlc
    }

    pub fn contains_usage(&self, usage: Usage) -> bool {
        self.rules.iter().any(|rule| rule.usage == usage)
    }

    /// First rule in table order that applies to `usage` reported in a
    /// field of kind `kind`.
    pub fn lookup(&self, usage: Usage, kind: FieldKind) -> Option<&MapRule> {
        self.rules.iter().find(|rule| rule.applies_to(usage, kind))
    }
}

impl fmt::Debug for MapTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapTable")
            .field("identity", &self.identity)
            .field("page", &self.page)
            .field("description", &self.description)
            .field("rules", &self.rules.len())
            .field("final_callback", &self.final_callback.map(|cb| cb.name()))
            .finish()
    }
}

fn validate_rules(page: UsagePage, rules: &[MapRule]) -> HidMapResult<()> {
    for (index, rule) in rules.iter().enumerate() {
        if rule.usage.page != page {
            return Err(HidMapError::ForeignUsagePage {
                usage: rule.usage,
                expected: page,
            });
        }

        check_code(rule)?;

        if let Some(first) = rules
            .iter()
            .take(index)
            .position(|earlier| earlier.usage == rule.usage && earlier.field.overlaps(rule.field))
        {
            return Err(HidMapError::AmbiguousRule {
                usage: rule.usage,
                first,
                second: index,
            });
        }
    }
    Ok(())
}

fn check_code(rule: &MapRule) -> HidMapResult<()> {
    let (event_type, code, min, max) = match rule.kind {
        RuleKind::Key(code) => (EventType::Key, code, KEY_RESERVED + 1, KEY_MAX),
        RuleKind::Absolute(code) => (EventType::Abs, code, 0, ABS_MAX),
        RuleKind::Relative(code) => (EventType::Rel, code, 0, REL_MAX),
        RuleKind::Callback(_) => return Ok(()),
    };
    if code < min || code > max {
        return Err(HidMapError::CodeOutOfRange {
            usage: rule.usage,
            event_type,
            code,
            max,
        });
    }
    Ok(())
}
