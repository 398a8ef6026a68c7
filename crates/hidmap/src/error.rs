//! Error types for table construction, descriptors and attach.
//!
//! Only structural and attach-time conditions are errors. A value that
//! carries no change and a usage without a rule are reported through
//! [`crate::CallbackStatus::NoData`] and [`crate::ReportSummary`] instead.

use crate::codes::EventType;
use crate::usage::{TopLevelCollection, Usage, UsagePage};

/// Errors raised by the mapping engine.
#[derive(Debug, thiserror::Error)]
pub enum HidMapError {
    /// Rule usage does not belong to the table's usage page
    #[error("Rule for usage {usage} is outside the table usage page {expected}")]
    ForeignUsagePage {
        /// Offending usage
        usage: Usage,
        /// Usage page of the table
        expected: UsagePage,
    },

    /// Target code exceeds the range of its event type
    #[error("Rule for usage {usage} targets {event_type} code {code:#x} (max {max:#x})")]
    CodeOutOfRange {
        /// Offending usage
        usage: Usage,
        /// Event type of the target
        event_type: EventType,
        /// Target code
        code: u16,
        /// Largest legal code
        max: u16,
    },

    /// Two rules for the same usage accept the same field kind
    #[error("Usage {usage} has overlapping rules at table positions {first} and {second}")]
    AmbiguousRule {
        /// Offending usage
        usage: Usage,
        /// Index of the earlier rule
        first: usize,
        /// Index of the later rule
        second: usize,
    },

    /// Callback rule without a callback reference
    #[error("Callback rule for usage {0} has no callback")]
    MissingCallback(Usage),

    /// Callback rule naming a callback that is not registered
    #[error("Callback '{name}' for usage {usage} is not registered")]
    UnknownCallback {
        /// Offending usage
        usage: Usage,
        /// Callback name from the descriptor
        name: String,
    },

    /// Direct rule without a target code
    #[error("Rule for usage {0} has no target code")]
    MissingCode(Usage),

    /// Descriptor schema version not understood
    #[error("Unsupported map schema version: {0}")]
    UnsupportedSchemaVersion(u8),

    /// No field of the device report has a rule in the table
    #[error("No usage in the report matches {description} ({identity})")]
    NoUsagesMatched {
        /// Table description
        description: String,
        /// Table identity tag
        identity: TopLevelCollection,
    },

    /// Invalid engine configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed JSON document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HidMapError {
    /// Whether the error describes a defect in a table or descriptor.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            HidMapError::ForeignUsagePage { .. }
                | HidMapError::CodeOutOfRange { .. }
                | HidMapError::AmbiguousRule { .. }
                | HidMapError::MissingCallback(_)
                | HidMapError::UnknownCallback { .. }
                | HidMapError::MissingCode(_)
                | HidMapError::UnsupportedSchemaVersion(_)
        )
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        HidMapError::Config(msg.into())
    }
}

/// A specialized `Result` type for mapping operations.
pub type HidMapResult<T> = Result<T, HidMapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HidMapError::MissingCallback(Usage::new(UsagePage::CONSUMER, 0x0e0));
        insta::assert_snapshot!(
            err.to_string(),
            @"Callback rule for usage 000c:00e0 has no callback"
        );

        let err = HidMapError::config("bad level");
        insta::assert_snapshot!(err.to_string(), @"Configuration error: bad level");
    }

    #[test]
    fn test_code_out_of_range_display() {
        let err = HidMapError::CodeOutOfRange {
            usage: Usage::new(UsagePage::CONSUMER, 0x030),
            event_type: EventType::Key,
            code: 0x300,
            max: 0x2ff,
        };
        insta::assert_snapshot!(
            err.to_string(),
            @"Rule for usage 000c:0030 targets EV_KEY code 0x300 (max 0x2ff)"
        );
    }

    #[test]
    fn test_structural_classification() {
        let usage = Usage::new(UsagePage::CONSUMER, 0x030);
        assert!(HidMapError::MissingCode(usage).is_structural());
        assert!(HidMapError::UnsupportedSchemaVersion(0).is_structural());
        assert!(!HidMapError::config("x").is_structural());
        assert!(
            !HidMapError::NoUsagesMatched {
                description: "Consumer Control".into(),
                identity: TopLevelCollection::new(UsagePage::CONSUMER, 1),
            }
            .is_structural()
        );
    }
}
