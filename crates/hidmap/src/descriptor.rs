//! Declarative map assets
//!
//! A [`MapDescriptor`] is the JSON form of a mapping table. Callback rules
//! name their callback; names are resolved through a [`CallbackRegistry`]
//! when the descriptor is compiled, so a missing or unknown callback is
//! rejected before any device attaches.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::callback::MapCallback;
use crate::error::{HidMapError, HidMapResult};
use crate::rule::{FieldMatch, MapRule, RuleKind};
use crate::table::MapTable;
use crate::usage::{TopLevelCollection, Usage, UsagePage};

/// Top-level versioned descriptor stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MapDescriptor {
    pub schema_version: u8,
    pub identity: TopLevelCollection,

    /// Usage page of the rules; defaults to the identity page.
    #[serde(default)]
    pub usage_page: Option<UsagePage>,

    pub description: String,

    #[serde(default)]
    pub rules: Vec<RuleDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleDescriptor {
    pub usage: u16,
    pub kind: RuleKindHint,

    #[serde(default)]
    pub code: Option<u16>,

    #[serde(default)]
    pub callback: Option<String>,

    #[serde(default)]
    pub field: Option<FieldHint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKindHint {
    Key,
    Abs,
    Rel,
    Callback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldHint {
    Any,
    Abs,
    Rel,
}

impl From<FieldHint> for FieldMatch {
    fn from(hint: FieldHint) -> Self {
        match hint {
            FieldHint::Any => FieldMatch::Any,
            FieldHint::Abs => FieldMatch::Absolute,
            FieldHint::Rel => FieldMatch::Relative,
        }
    }
}

/// Callbacks available to descriptors, by name.
#[derive(Debug, Default, Clone)]
pub struct CallbackRegistry {
    callbacks: BTreeMap<&'static str, &'static dyn MapCallback>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, callback: &'static dyn MapCallback) -> &mut Self {
        self.callbacks.insert(callback.name(), callback);
        self
    }

    pub fn get(&self, name: &str) -> Option<&'static dyn MapCallback> {
        self.callbacks.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl MapDescriptor {
    pub fn from_json_str(json: &str) -> HidMapResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn page(&self) -> UsagePage {
        self.usage_page.unwrap_or(self.identity.page)
    }

    /// Resolves every rule and builds a validated table.
    pub fn compile(&self, registry: &CallbackRegistry) -> HidMapResult<MapTable> {
        if self.schema_version == 0 {
            return Err(HidMapError::UnsupportedSchemaVersion(self.schema_version));
        }

        let page = self.page();
        let rules = self
            .rules
            .iter()
            .map(|rule| rule.compile(page, registry))
            .collect::<HidMapResult<Vec<_>>>()?;

        MapTable::with_page(self.identity, page, self.description.clone(), &rules)
    }
}

impl RuleDescriptor {
    fn compile(&self, page: UsagePage, registry: &CallbackRegistry) -> HidMapResult<MapRule> {
        let usage = Usage::new(page, self.usage);
        let code = || self.code.ok_or(HidMapError::MissingCode(usage));

        let (kind, default_field) = match self.kind {
            RuleKindHint::Key => (RuleKind::Key(code()?), FieldMatch::Any),
            RuleKindHint::Abs => (RuleKind::Absolute(code()?), FieldMatch::Absolute),
            RuleKindHint::Rel => (RuleKind::Relative(code()?), FieldMatch::Relative),
            RuleKindHint::Callback => {
                let name = self
                    .callback
                    .as_deref()
                    .ok_or(HidMapError::MissingCallback(usage))?;
                let callback = registry
                    .get(name)
                    .ok_or_else(|| HidMapError::UnknownCallback {
                        usage,
                        name: name.to_string(),
                    })?;
                (RuleKind::Callback(callback), FieldMatch::Any)
            }
        };

        Ok(MapRule {
            usage,
            kind,
            field: self.field.map_or(default_field, FieldMatch::from),
        })
    }
}
