//! Configuration for the filter editor.

use std::time::Duration;

use query_engine_metadata::metadata::{Connective, Dialect};

use crate::version1::{DEFAULT_MIN_ATTRIBUTE_LENGTH, DEFAULT_RESOLVE_DEBOUNCE_MS};

/// The 'Configuration' type collects all the information necessary to run an editor.
///
/// 'ParsedConfiguration' deals with the serialized format; values of this type are
/// produced from it using 'make_runtime_configuration', which also applies any
/// environment overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub editor: EditorSettings,
}

/// Settings consulted by the filter group editor and the attribute type resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSettings {
    /// How long keystrokes in an attribute field must pause before resolving its type.
    pub resolve_debounce: Duration,
    /// Attribute names shorter than this are never resolved.
    pub min_attribute_length: usize,
    /// The dialect whose operators the editor offers.
    pub dialect: Dialect,
    /// The connective a newly added group is joined with.
    pub default_inter_group_connective: Connective,
}

impl Default for EditorSettings {
    fn default() -> Self {
        EditorSettings {
            resolve_debounce: Duration::from_millis(DEFAULT_RESOLVE_DEBOUNCE_MS),
            min_attribute_length: DEFAULT_MIN_ATTRIBUTE_LENGTH,
            dialect: Dialect::default(),
            default_inter_group_connective: Connective::default(),
        }
    }
}

impl EditorSettings {
    /// The same settings for another dialect; each tab edits one dialect.
    pub fn for_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }
}
