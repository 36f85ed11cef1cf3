//! Attribute type information as resolved from the record store's metadata.

use std::collections::BTreeSet;

use enum_iterator::Sequence;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::operators::ComparisonOperator;

/// The kinds of attribute the editor distinguishes between.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Sequence,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum AttributeKind {
    String,
    Number,
    Date,
    Boolean,
    OptionSet,
    Lookup,
    #[default]
    Unknown,
}

impl AttributeKind {
    const NULL_TESTS: &'static [ComparisonOperator] =
        &[ComparisonOperator::IsNull, ComparisonOperator::IsNotNull];

    const EQUALITY: &'static [ComparisonOperator] =
        &[ComparisonOperator::Equals, ComparisonOperator::NotEquals];

    const ORDERING: &'static [ComparisonOperator] = &[
        ComparisonOperator::GreaterThan,
        ComparisonOperator::GreaterThanOrEqualTo,
        ComparisonOperator::LessThan,
        ComparisonOperator::LessThanOrEqualTo,
    ];

    const SUBSTRING: &'static [ComparisonOperator] = &[
        ComparisonOperator::Contains,
        ComparisonOperator::NotContains,
        ComparisonOperator::BeginsWith,
        ComparisonOperator::EndsWith,
    ];

    const LISTS: &'static [ComparisonOperator] =
        &[ComparisonOperator::In, ComparisonOperator::NotIn];

    const DATES: &'static [ComparisonOperator] = &[
        ComparisonOperator::On,
        ComparisonOperator::OnOrBefore,
        ComparisonOperator::OnOrAfter,
        ComparisonOperator::LastXDays,
        ComparisonOperator::NextXDays,
    ];

    /// Returns the default set of comparison operators for the given kind.
    /// An unknown kind allows everything.
    pub fn comparison_operators(&self) -> BTreeSet<ComparisonOperator> {
        if *self == AttributeKind::Unknown {
            return enum_iterator::all::<ComparisonOperator>().collect();
        }
        let mut operators = BTreeSet::from_iter(Self::EQUALITY.iter().copied());
        operators.extend(Self::NULL_TESTS.iter().copied());
        let extra: &[&[ComparisonOperator]] = match self {
            AttributeKind::String => &[Self::SUBSTRING, Self::LISTS],
            AttributeKind::Number => &[Self::ORDERING, Self::LISTS],
            AttributeKind::Date => &[Self::ORDERING, Self::DATES],
            AttributeKind::OptionSet => &[Self::LISTS],
            AttributeKind::Lookup => &[Self::LISTS],
            AttributeKind::Boolean | AttributeKind::Unknown => &[],
        };
        operators.extend(extra.iter().flat_map(|set| set.iter().copied()));
        operators
    }
}

/// One choice of an option-set (or boolean) attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OptionSetOption {
    pub value: String,
    pub label: String,
}

/// Information about an attribute, produced by the attribute type resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttributeTypeInfo {
    pub logical_name: String,
    pub kind: AttributeKind,
    pub allowed_operator_ids: Vec<String>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionSetOption>,
}

impl AttributeTypeInfo {
    /// Type information allowing the kind's default operators.
    pub fn new(logical_name: impl Into<String>, kind: AttributeKind) -> Self {
        AttributeTypeInfo {
            logical_name: logical_name.into(),
            kind,
            allowed_operator_ids: kind
                .comparison_operators()
                .iter()
                .map(|operator| operator.id().to_string())
                .collect(),
            options: vec![],
        }
    }

    /// An attribute we know nothing about.
    pub fn unknown(logical_name: impl Into<String>) -> Self {
        Self::new(logical_name, AttributeKind::Unknown)
    }

    pub fn with_options(mut self, options: Vec<OptionSetOption>) -> Self {
        self.options = options;
        self
    }

    /// The allowed operators, in registry order. Unrecognised identifiers are ignored.
    pub fn allowed_operators(&self) -> Vec<ComparisonOperator> {
        enum_iterator::all::<ComparisonOperator>()
            .filter(|operator| {
                self.allowed_operator_ids
                    .iter()
                    .any(|id| id.as_str() == operator.id())
            })
            .collect()
    }
}
