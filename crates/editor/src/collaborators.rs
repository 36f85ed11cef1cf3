//! The services an editor relies on but does not implement.
//!
//! Futures returned by these traits are not `Send`: an editor lives on a single
//! thread, next to the view it drives.

use async_trait::async_trait;
use query_engine_metadata::metadata::AttributeTypeInfo;

use crate::value_editor::{ValueEditor, ValueSlot};

/// Knows which record type the filter applies to.
#[async_trait(?Send)]
pub trait RecordTypeProvider {
    /// The logical name of the record type, if one is known yet.
    async fn resolve_record_type(&self) -> Option<String>;
}

/// Looks up attribute metadata in the record store.
#[async_trait(?Send)]
pub trait MetadataSource {
    /// `None` when the record type has no such attribute, or the lookup failed.
    async fn lookup_attribute_metadata(
        &self,
        attribute_name: &str,
        record_type: &str,
    ) -> Option<AttributeTypeInfo>;
}

/// Draws the widget of a value slot.
pub trait ValueEditorRenderer {
    /// Called whenever the widget a slot should show changes.
    fn render_value_editor(&self, slot: ValueSlot, value_editor: &ValueEditor);
}

/// Lets the user pick an attribute from a list.
#[async_trait(?Send)]
pub trait AttributePicker {
    /// `None` when the user dismissed the picker.
    async fn pick_attribute(&self, record_type: &str) -> Option<String>;
}

#[async_trait(?Send)]
impl<T: RecordTypeProvider + ?Sized> RecordTypeProvider for std::rc::Rc<T> {
    async fn resolve_record_type(&self) -> Option<String> {
        (**self).resolve_record_type().await
    }
}

#[async_trait(?Send)]
impl<T: MetadataSource + ?Sized> MetadataSource for std::rc::Rc<T> {
    async fn lookup_attribute_metadata(
        &self,
        attribute_name: &str,
        record_type: &str,
    ) -> Option<AttributeTypeInfo> {
        (**self)
            .lookup_attribute_metadata(attribute_name, record_type)
            .await
    }
}

impl<T: ValueEditorRenderer + ?Sized> ValueEditorRenderer for std::rc::Rc<T> {
    fn render_value_editor(&self, slot: ValueSlot, value_editor: &ValueEditor) {
        (**self).render_value_editor(slot, value_editor);
    }
}

#[async_trait(?Send)]
impl<T: AttributePicker + ?Sized> AttributePicker for std::rc::Rc<T> {
    async fn pick_attribute(&self, record_type: &str) -> Option<String> {
        (**self).pick_attribute(record_type).await
    }
}
