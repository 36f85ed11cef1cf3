//! The canonical, UI-independent filter model.
//!
//! A [`FilterGroupSequence`] is what the editor's `extract()` produces and what the
//! query compiler consumes. Groups combine strictly left to right: each group after
//! the first records how it joins everything that came before it.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::attributes::AttributeKind;
use super::operators::ComparisonOperator;

/// How a group combines with the groups before it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Connective {
    #[default]
    And,
    Or,
}

/// How the conditions of a single group combine.
///
/// `Not` joins the conditions with "and" and negates the result as a whole.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum GroupConnective {
    #[default]
    And,
    Or,
    Not,
}

/// The value of a condition. A list only comes from a multi-select editor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RawValue {
    Single(String),
    Multiple(Vec<String>),
}

impl Default for RawValue {
    fn default() -> Self {
        RawValue::Single(String::new())
    }
}

impl RawValue {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        match self {
            RawValue::Single(value) => value.trim().is_empty(),
            RawValue::Multiple(values) => values.iter().all(|value| value.trim().is_empty()),
        }
    }

    /// The same value with surrounding whitespace removed; blank list entries are dropped.
    pub fn trimmed(&self) -> RawValue {
        match self {
            RawValue::Single(value) => RawValue::Single(value.trim().to_string()),
            RawValue::Multiple(values) => RawValue::Multiple(
                values
                    .iter()
                    .map(|value| value.trim())
                    .filter(|value| !value.is_empty())
                    .map(ToString::to_string)
                    .collect(),
            ),
        }
    }

    /// Every value held, in order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            RawValue::Single(value) => vec![value.as_str()],
            RawValue::Multiple(values) => values.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Single(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Single(value)
    }
}

impl From<Vec<String>> for RawValue {
    fn from(values: Vec<String>) -> Self {
        RawValue::Multiple(values)
    }
}

/// A single `attribute operator value` test.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub attribute_name: String,
    #[serde(rename = "operatorId")]
    pub operator: ComparisonOperator,
    #[serde(default)]
    pub raw_value: RawValue,
    /// The kind the attribute type resolver identified, if any.
    #[serde(default)]
    pub attribute_kind: AttributeKind,
}

impl Condition {
    pub fn new(
        attribute_name: impl Into<String>,
        operator: ComparisonOperator,
        raw_value: impl Into<RawValue>,
    ) -> Self {
        Condition {
            attribute_name: attribute_name.into(),
            operator,
            raw_value: raw_value.into(),
            attribute_kind: AttributeKind::Unknown,
        }
    }

    pub fn with_kind(mut self, kind: AttributeKind) -> Self {
        self.attribute_kind = kind;
        self
    }
}

/// A group of conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FilterGroup {
    pub connective: GroupConnective,
    pub conditions: Vec<Condition>,
    /// `None` for the first group of a sequence.
    #[serde(default)]
    pub inter_group_connective: Option<Connective>,
}

impl FilterGroup {
    pub fn new(connective: GroupConnective, conditions: Vec<Condition>) -> Self {
        FilterGroup {
            connective,
            conditions,
            inter_group_connective: None,
        }
    }

    /// The same group, combined with the previous group using `connective`.
    pub fn joined_with(mut self, connective: Connective) -> Self {
        self.inter_group_connective = Some(connective);
        self
    }
}

/// An ordered list of groups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct FilterGroupSequence(pub Vec<FilterGroup>);

impl FilterGroupSequence {
    pub fn empty() -> Self {
        FilterGroupSequence(vec![])
    }

    pub fn groups(&self) -> &[FilterGroup] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<FilterGroup>> for FilterGroupSequence {
    fn from(groups: Vec<FilterGroup>) -> Self {
        FilterGroupSequence(groups)
    }
}
