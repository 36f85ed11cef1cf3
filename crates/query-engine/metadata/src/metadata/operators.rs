//! The operator registry: a fixed, ordered catalogue of comparison operators and
//! the tokens each dialect renders them with.

use enum_iterator::Sequence;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::dialect::Dialect;

/// The complete list of comparison operators a condition can use.
/// Not all of these are available in every dialect or for every attribute kind.
///
/// Declaration order is the order operator choices are offered in. `Ord` follows
/// it as well, so sorted collections of operators keep registry order.
#[derive(
    Debug,
    Clone,
    Copy,
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
pub enum ComparisonOperator {
    #[serde(rename = "eq")]
    Equals,
    #[serde(rename = "ne")]
    NotEquals,
    #[serde(rename = "gt")]
    GreaterThan,
    #[serde(rename = "ge")]
    GreaterThanOrEqualTo,
    #[serde(rename = "lt")]
    LessThan,
    #[serde(rename = "le")]
    LessThanOrEqualTo,
    #[serde(rename = "contains")]
    Contains,
    #[serde(rename = "not-contains")]
    NotContains,
    #[serde(rename = "begins-with")]
    BeginsWith,
    #[serde(rename = "ends-with")]
    EndsWith,
    #[serde(rename = "is-null")]
    IsNull,
    #[serde(rename = "is-not-null")]
    IsNotNull,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "not-in")]
    NotIn,
    #[serde(rename = "on")]
    On,
    #[serde(rename = "on-or-before")]
    OnOrBefore,
    #[serde(rename = "on-or-after")]
    OnOrAfter,
    #[serde(rename = "last-x-days")]
    LastXDays,
    #[serde(rename = "next-x-days")]
    NextXDays,
}

/// Where a substring operator anchors its pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wildcard {
    Anywhere,
    Prefix,
    Suffix,
}

/// How a condition using an operator is laid out, independent of dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorShape {
    /// `<attr> <token> <value>`
    Binary,
    /// `<attr> <token>`, never carries a value.
    NullTest,
    /// A pattern match: a function call in REST, a `like` in XML.
    Substring { wildcard: Wildcard, negated: bool },
    /// The value is a list of alternatives.
    List,
}

impl ComparisonOperator {
    /// The stable identifier stored in the canonical model.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Equals => "eq",
            Self::NotEquals => "ne",
            Self::GreaterThan => "gt",
            Self::GreaterThanOrEqualTo => "ge",
            Self::LessThan => "lt",
            Self::LessThanOrEqualTo => "le",
            Self::Contains => "contains",
            Self::NotContains => "not-contains",
            Self::BeginsWith => "begins-with",
            Self::EndsWith => "ends-with",
            Self::IsNull => "is-null",
            Self::IsNotNull => "is-not-null",
            Self::In => "in",
            Self::NotIn => "not-in",
            Self::On => "on",
            Self::OnOrBefore => "on-or-before",
            Self::OnOrAfter => "on-or-after",
            Self::LastXDays => "last-x-days",
            Self::NextXDays => "next-x-days",
        }
    }

    /// The label offered to the user.
    pub fn display_text(&self) -> &'static str {
        match self {
            Self::Equals => "Equals",
            Self::NotEquals => "Does Not Equal",
            Self::GreaterThan => "Greater Than",
            Self::GreaterThanOrEqualTo => "Greater Than Or Equal To",
            Self::LessThan => "Less Than",
            Self::LessThanOrEqualTo => "Less Than Or Equal To",
            Self::Contains => "Contains",
            Self::NotContains => "Does Not Contain",
            Self::BeginsWith => "Begins With",
            Self::EndsWith => "Ends With",
            Self::IsNull => "Is Null",
            Self::IsNotNull => "Is Not Null",
            Self::In => "In",
            Self::NotIn => "Not In",
            Self::On => "On",
            Self::OnOrBefore => "On Or Before",
            Self::OnOrAfter => "On Or After",
            Self::LastXDays => "Last X Days",
            Self::NextXDays => "Next X Days",
        }
    }

    /// Look an operator up by its identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        enum_iterator::all::<Self>().find(|operator| operator.id() == id)
    }

    /// Only the null tests work without a value.
    pub fn requires_value(&self) -> bool {
        !matches!(self, Self::IsNull | Self::IsNotNull)
    }

    pub fn shape(&self) -> OperatorShape {
        match self {
            Self::IsNull | Self::IsNotNull => OperatorShape::NullTest,
            Self::Contains => OperatorShape::Substring {
                wildcard: Wildcard::Anywhere,
                negated: false,
            },
            Self::NotContains => OperatorShape::Substring {
                wildcard: Wildcard::Anywhere,
                negated: true,
            },
            Self::BeginsWith => OperatorShape::Substring {
                wildcard: Wildcard::Prefix,
                negated: false,
            },
            Self::EndsWith => OperatorShape::Substring {
                wildcard: Wildcard::Suffix,
                negated: false,
            },
            Self::In | Self::NotIn => OperatorShape::List,
            _ => OperatorShape::Binary,
        }
    }

    /// The token used by the REST dialect, if the operator exists there.
    pub fn rest_token(&self) -> Option<&'static str> {
        match self {
            Self::Equals => Some("eq"),
            Self::NotEquals => Some("ne"),
            Self::GreaterThan => Some("gt"),
            Self::GreaterThanOrEqualTo => Some("ge"),
            Self::LessThan => Some("lt"),
            Self::LessThanOrEqualTo => Some("le"),
            Self::Contains => Some("contains"),
            Self::NotContains => Some("not contains"),
            Self::BeginsWith => Some("startswith"),
            Self::EndsWith => Some("endswith"),
            Self::IsNull => Some("eq null"),
            Self::IsNotNull => Some("ne null"),
            Self::In => Some("in"),
            Self::NotIn
            | Self::On
            | Self::OnOrBefore
            | Self::OnOrAfter
            | Self::LastXDays
            | Self::NextXDays => None,
        }
    }

    /// The `operator` attribute used by the XML dialect, if the operator exists there.
    pub fn xml_token(&self) -> Option<&'static str> {
        match self {
            Self::Equals => Some("eq"),
            Self::NotEquals => Some("ne"),
            Self::GreaterThan => Some("gt"),
            Self::GreaterThanOrEqualTo => Some("ge"),
            Self::LessThan => Some("lt"),
            Self::LessThanOrEqualTo => Some("le"),
            Self::Contains | Self::BeginsWith | Self::EndsWith => Some("like"),
            Self::NotContains => Some("not-like"),
            Self::IsNull => Some("null"),
            Self::IsNotNull => Some("not-null"),
            Self::In => Some("in"),
            Self::NotIn => Some("not-in"),
            Self::On => Some("on"),
            Self::OnOrBefore => Some("on-or-before"),
            Self::OnOrAfter => Some("on-or-after"),
            Self::LastXDays => Some("last-x-days"),
            Self::NextXDays => Some("next-x-days"),
        }
    }

    pub fn token(&self, dialect: Dialect) -> Option<&'static str> {
        match dialect {
            Dialect::Rest => self.rest_token(),
            Dialect::Xml => self.xml_token(),
        }
    }

    pub fn is_available_in(&self, dialect: Dialect) -> bool {
        self.token(dialect).is_some()
    }

    /// The descriptor record for this operator.
    pub fn describe(&self) -> Operator {
        Operator {
            id: self.id(),
            display_text: self.display_text(),
            requires_value: self.requires_value(),
            dialect_tokens: DialectTokens {
                rest_token: self.rest_token(),
                xml_token: self.xml_token(),
            },
        }
    }
}

impl std::fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// The tokens an operator renders to in each dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialectTokens {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_token: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xml_token: Option<&'static str>,
}

/// An operator as offered to a caller populating operator choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    pub id: &'static str,
    pub display_text: &'static str,
    pub requires_value: bool,
    pub dialect_tokens: DialectTokens,
}

/// All operators that have a token in the given dialect, in registry order.
pub fn list_operators(dialect: Dialect) -> Vec<Operator> {
    dialect_operators(dialect)
        .map(|operator| operator.describe())
        .collect()
}

/// Like [`list_operators`], but yielding the operators themselves.
pub fn dialect_operators(dialect: Dialect) -> impl Iterator<Item = ComparisonOperator> {
    enum_iterator::all::<ComparisonOperator>()
        .filter(move |operator| operator.is_available_in(dialect))
}

/// Whether the value editor should be enabled for an operator.
///
/// Unknown identifiers keep the editor enabled.
pub fn should_show_value_editor(operator_id: &str) -> bool {
    ComparisonOperator::from_id(operator_id).map_or(true, |operator| operator.requires_value())
}
