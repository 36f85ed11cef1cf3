//! Which widget a condition's value slot shows.

use query_engine_metadata::metadata::{
    AttributeKind, AttributeTypeInfo, ComparisonOperator, OperatorShape, OptionSetOption, RawValue,
};

use crate::editor::{ConditionId, GroupId};

/// Identifies the value slot of one condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueSlot {
    pub group: GroupId,
    pub condition: ConditionId,
}

/// The widget types a value slot can hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueEditorKind {
    Text,
    Number,
    Date,
    Toggle,
    /// One choice out of an option set.
    Choice(Vec<OptionSetOption>),
    /// Any number of choices out of an option set; the value is a list.
    MultiSelect(Vec<OptionSetOption>),
}

/// The widget of a value slot. A disabled widget stays visible but takes no input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueEditor {
    pub kind: ValueEditorKind,
    pub enabled: bool,
}

impl Default for ValueEditor {
    fn default() -> Self {
        ValueEditor {
            kind: ValueEditorKind::Text,
            enabled: true,
        }
    }
}

impl ValueEditor {
    /// The widget for an attribute of the given type under the given operator.
    /// Attributes of unknown type get a text box.
    pub fn for_attribute(
        info: Option<&AttributeTypeInfo>,
        operator: Option<ComparisonOperator>,
    ) -> ValueEditor {
        let lists = operator.is_some_and(|operator| operator.shape() == OperatorShape::List);
        let kind = match info {
            None => ValueEditorKind::Text,
            Some(info) => match info.kind {
                AttributeKind::Number => ValueEditorKind::Number,
                AttributeKind::Date => ValueEditorKind::Date,
                AttributeKind::Boolean => ValueEditorKind::Toggle,
                AttributeKind::OptionSet if lists => {
                    ValueEditorKind::MultiSelect(info.options.clone())
                }
                AttributeKind::OptionSet => ValueEditorKind::Choice(info.options.clone()),
                AttributeKind::String | AttributeKind::Lookup | AttributeKind::Unknown => {
                    ValueEditorKind::Text
                }
            },
        };
        ValueEditor {
            kind,
            enabled: operator.map_or(true, |operator| operator.requires_value()),
        }
    }

    pub fn is_multi_select(&self) -> bool {
        matches!(self.kind, ValueEditorKind::MultiSelect(_))
    }

    /// The value reshaped to fit this widget: a multi-select holds a list, everything
    /// else a single value. Blank values reshape to the widget's empty value.
    pub fn reshape(&self, value: &RawValue) -> RawValue {
        match (self.is_multi_select(), value) {
            (true, RawValue::Multiple(_)) | (false, RawValue::Single(_)) => value.clone(),
            (true, RawValue::Single(single)) if single.trim().is_empty() => {
                RawValue::Multiple(vec![])
            }
            (true, RawValue::Single(single)) => RawValue::Multiple(vec![single.clone()]),
            (false, RawValue::Multiple(values)) => {
                RawValue::Single(values.first().cloned().unwrap_or_default())
            }
        }
    }

    /// The value a disabled or freshly reset widget of this type holds.
    pub fn empty_value(&self) -> RawValue {
        if self.is_multi_select() {
            RawValue::Multiple(vec![])
        } else {
            RawValue::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statecode() -> AttributeTypeInfo {
        AttributeTypeInfo::new("statecode", AttributeKind::OptionSet).with_options(vec![
            OptionSetOption {
                value: "0".to_string(),
                label: "Active".to_string(),
            },
            OptionSetOption {
                value: "1".to_string(),
                label: "Inactive".to_string(),
            },
        ])
    }

    #[test]
    fn option_sets_use_a_multi_select_for_lists_only() {
        let info = statecode();
        assert!(
            ValueEditor::for_attribute(Some(&info), Some(ComparisonOperator::In))
                .is_multi_select()
        );
        assert_eq!(
            ValueEditor::for_attribute(Some(&info), Some(ComparisonOperator::Equals)).kind,
            ValueEditorKind::Choice(info.options.clone())
        );
    }

    #[test]
    fn null_tests_disable_the_widget() {
        let info = AttributeTypeInfo::new("revenue", AttributeKind::Number);
        assert_eq!(
            ValueEditor::for_attribute(Some(&info), Some(ComparisonOperator::IsNull)),
            ValueEditor {
                kind: ValueEditorKind::Number,
                enabled: false
            }
        );
    }

    #[test]
    fn unknown_attributes_get_a_text_box() {
        assert_eq!(
            ValueEditor::for_attribute(None, Some(ComparisonOperator::GreaterThan)),
            ValueEditor::default()
        );
        assert_eq!(
            ValueEditor::for_attribute(
                Some(&AttributeTypeInfo::unknown("x_custom")),
                Some(ComparisonOperator::In)
            ),
            ValueEditor::default()
        );
    }

    #[test]
    fn values_are_reshaped_to_fit_the_widget() {
        let multi = ValueEditor::for_attribute(Some(&statecode()), Some(ComparisonOperator::In));
        assert_eq!(
            multi.reshape(&RawValue::from("1")),
            RawValue::Multiple(vec!["1".to_string()])
        );
        assert_eq!(multi.reshape(&RawValue::empty()), RawValue::Multiple(vec![]));

        let single = ValueEditor::default();
        assert_eq!(
            single.reshape(&RawValue::Multiple(vec!["0".to_string(), "1".to_string()])),
            RawValue::from("0")
        );
        assert_eq!(single.reshape(&RawValue::Multiple(vec![])), RawValue::empty());
    }
}
