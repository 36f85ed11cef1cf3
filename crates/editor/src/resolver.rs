//! Resolve what kind of attribute a name refers to.

use std::rc::Rc;

use filter_editor_configuration::EditorSettings;
use query_engine_metadata::metadata::AttributeTypeInfo;
use tracing::{info_span, Instrument};

use crate::collaborators::{MetadataSource, RecordTypeProvider};

/// Looks attribute names up in the record store's metadata.
///
/// Resolution never fails: a name that is too short, a missing record type and a
/// metadata miss all resolve to `None`, which the editor treats as an attribute of
/// unknown type.
#[derive(Clone)]
pub struct AttributeTypeResolver {
    metadata: Rc<dyn MetadataSource>,
    min_attribute_length: usize,
}

impl AttributeTypeResolver {
    pub fn new(metadata: Rc<dyn MetadataSource>, settings: &EditorSettings) -> Self {
        AttributeTypeResolver {
            metadata,
            min_attribute_length: settings.min_attribute_length,
        }
    }

    /// Whether a name is long enough to be worth resolving.
    pub fn is_resolvable(&self, attribute_name: &str) -> bool {
        attribute_name.trim().chars().count() >= self.min_attribute_length
    }

    pub async fn resolve(
        &self,
        attribute_name: &str,
        record_types: &dyn RecordTypeProvider,
    ) -> Option<AttributeTypeInfo> {
        let attribute_name = attribute_name.trim();
        if !self.is_resolvable(attribute_name) {
            tracing::debug!(attribute_name, "attribute name too short to resolve");
            return None;
        }

        let record_type = record_types
            .resolve_record_type()
            .instrument(info_span!("Resolve record type"))
            .await
            .filter(|record_type| !record_type.trim().is_empty());
        let Some(record_type) = record_type else {
            tracing::debug!(attribute_name, "no record type, skipping resolution");
            return None;
        };

        let info = self
            .metadata
            .lookup_attribute_metadata(attribute_name, &record_type)
            .instrument(info_span!("Lookup attribute metadata", attribute_name, %record_type))
            .await;
        match &info {
            Some(info) => {
                tracing::debug!(attribute_name, kind = ?info.kind, "resolved attribute type");
            }
            None => tracing::debug!(attribute_name, %record_type, "no metadata for attribute"),
        }
        info
    }
}

impl std::fmt::Debug for AttributeTypeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttributeTypeResolver")
            .field("min_attribute_length", &self.min_attribute_length)
            .finish_non_exhaustive()
    }
}
