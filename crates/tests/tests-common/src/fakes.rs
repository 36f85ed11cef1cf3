//! In-memory stand-ins for the services an editor depends on.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use filter_editor::collaborators::{
    AttributePicker, MetadataSource, RecordTypeProvider, ValueEditorRenderer,
};
use filter_editor::{ValueEditor, ValueSlot};
use query_engine_metadata::metadata::AttributeTypeInfo;

/// Attribute metadata for a single record type, answered after a configurable delay.
#[derive(Debug, Default)]
pub struct InMemoryMetadata {
    record_type: String,
    attributes: HashMap<String, AttributeTypeInfo>,
    delays: HashMap<String, Duration>,
    calls: RefCell<Vec<String>>,
}

impl InMemoryMetadata {
    pub fn new(record_type: impl Into<String>) -> Self {
        InMemoryMetadata {
            record_type: record_type.into(),
            ..InMemoryMetadata::default()
        }
    }

    pub fn with_attribute(mut self, info: AttributeTypeInfo) -> Self {
        self.attributes.insert(info.logical_name.clone(), info);
        self
    }

    /// Answer lookups of `attribute_name` only after `delay`, whether or not it exists.
    pub fn with_delay(mut self, attribute_name: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(attribute_name.into(), delay);
        self
    }

    /// Every attribute name looked up so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl MetadataSource for InMemoryMetadata {
    async fn lookup_attribute_metadata(
        &self,
        attribute_name: &str,
        record_type: &str,
    ) -> Option<AttributeTypeInfo> {
        self.calls.borrow_mut().push(attribute_name.to_string());
        if let Some(delay) = self.delays.get(attribute_name) {
            tokio::time::sleep(*delay).await;
        }
        if record_type != self.record_type {
            return None;
        }
        self.attributes.get(attribute_name).cloned()
    }
}

/// Always reports the same record type.
#[derive(Debug, Clone, Default)]
pub struct FixedRecordType(pub Option<String>);

impl FixedRecordType {
    pub fn new(record_type: impl Into<String>) -> Self {
        FixedRecordType(Some(record_type.into()))
    }

    pub fn none() -> Self {
        FixedRecordType(None)
    }
}

#[async_trait(?Send)]
impl RecordTypeProvider for FixedRecordType {
    async fn resolve_record_type(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Remembers every widget it was asked to draw.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    renders: RefCell<Vec<(ValueSlot, ValueEditor)>>,
}

impl RecordingRenderer {
    pub fn renders(&self) -> Vec<(ValueSlot, ValueEditor)> {
        self.renders.borrow().clone()
    }

    /// The widget last drawn in a slot.
    pub fn last_for(&self, slot: ValueSlot) -> Option<ValueEditor> {
        self.renders
            .borrow()
            .iter()
            .rev()
            .find(|(rendered, _)| *rendered == slot)
            .map(|(_, value_editor)| value_editor.clone())
    }
}

impl ValueEditorRenderer for RecordingRenderer {
    fn render_value_editor(&self, slot: ValueSlot, value_editor: &ValueEditor) {
        self.renders.borrow_mut().push((slot, value_editor.clone()));
    }
}

/// Answers picker requests from a script; an exhausted script dismisses the picker.
#[derive(Debug, Default)]
pub struct ScriptedPicker {
    answers: RefCell<VecDeque<Option<String>>>,
    requests: RefCell<Vec<String>>,
}

impl ScriptedPicker {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        ScriptedPicker {
            answers: RefCell::new(
                answers
                    .into_iter()
                    .map(|answer| answer.map(Into::into))
                    .collect(),
            ),
            requests: RefCell::default(),
        }
    }

    /// The record types the picker was opened for.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl AttributePicker for ScriptedPicker {
    async fn pick_attribute(&self, record_type: &str) -> Option<String> {
        self.requests.borrow_mut().push(record_type.to_string());
        self.answers.borrow_mut().pop_front().flatten()
    }
}
