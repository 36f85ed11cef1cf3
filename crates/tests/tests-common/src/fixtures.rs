//! A small account schema to resolve attributes against.

use std::rc::Rc;

use filter_editor::{AttributeTypeResolver, EditorSession, FilterGroupEditor};
use filter_editor_configuration::EditorSettings;
use query_engine_metadata::metadata::{AttributeKind, AttributeTypeInfo, OptionSetOption};

use crate::fakes::{FixedRecordType, InMemoryMetadata};

pub const ACCOUNT: &str = "account";

fn option(value: &str, label: &str) -> OptionSetOption {
    OptionSetOption {
        value: value.to_string(),
        label: label.to_string(),
    }
}

pub fn statecode() -> AttributeTypeInfo {
    AttributeTypeInfo::new("statecode", AttributeKind::OptionSet)
        .with_options(vec![option("0", "Active"), option("1", "Inactive")])
}

/// Metadata for a handful of account attributes, one of each kind.
pub fn account_metadata() -> InMemoryMetadata {
    InMemoryMetadata::new(ACCOUNT)
        .with_attribute(AttributeTypeInfo::new("name", AttributeKind::String))
        .with_attribute(AttributeTypeInfo::new("description", AttributeKind::String))
        .with_attribute(AttributeTypeInfo::new("revenue", AttributeKind::Number))
        .with_attribute(AttributeTypeInfo::new("createdon", AttributeKind::Date))
        .with_attribute(
            AttributeTypeInfo::new("donotemail", AttributeKind::Boolean)
                .with_options(vec![option("1", "Do Not Allow"), option("0", "Allow")]),
        )
        .with_attribute(AttributeTypeInfo::new(
            "primarycontactid",
            AttributeKind::Lookup,
        ))
        .with_attribute(statecode())
}

/// A session over an empty editor, resolving against the given metadata.
pub fn account_session(
    settings: EditorSettings,
    metadata: Rc<InMemoryMetadata>,
    editor: impl FnOnce(FilterGroupEditor) -> FilterGroupEditor,
) -> EditorSession {
    let resolver = AttributeTypeResolver::new(metadata, &settings);
    EditorSession::new(
        editor(FilterGroupEditor::new(settings)),
        resolver,
        Rc::new(FixedRecordType::new(ACCOUNT)),
    )
}
