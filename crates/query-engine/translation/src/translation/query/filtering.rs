//! The dialect-agnostic part of filter translation: validating conditions against a
//! dialect and deciding which value, if any, each one carries.

use query_engine_metadata::metadata::{
    ComparisonOperator, Condition, Connective, Dialect, FilterGroup, FilterGroupSequence,
    OperatorShape, RawValue,
};

use super::values::{translate_value, Literal};
use crate::translation::error::Error;

/// A condition checked against the target dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedCondition<'a> {
    pub attribute: &'a str,
    pub operator: ComparisonOperator,
    /// The dialect's token for the operator.
    pub token: &'static str,
    pub value: PreparedValue,
}

/// The value a prepared condition carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreparedValue {
    /// Null tests never carry a value, whatever the raw value held.
    None,
    Single(Literal),
    List(Vec<Literal>),
}

/// Check a condition against a dialect.
pub fn prepare_condition(
    condition: &Condition,
    dialect: Dialect,
) -> Result<PreparedCondition<'_>, Error> {
    let operator = condition.operator;
    let token = operator
        .token(dialect)
        .ok_or(Error::OperatorNotInDialect { operator, dialect })?;

    let attribute = condition.attribute_name.trim();
    if attribute.is_empty() {
        return Err(Error::MissingAttribute(operator));
    }

    let value = match operator.shape() {
        OperatorShape::NullTest => PreparedValue::None,
        // patterns are always text
        OperatorShape::Substring { .. } => {
            PreparedValue::Single(Literal::Text(single_value(condition, attribute)?))
        }
        OperatorShape::Binary => PreparedValue::Single(translate_value(
            &single_value(condition, attribute)?,
            condition.attribute_kind,
        )),
        OperatorShape::List => {
            let values = match condition.raw_value.trimmed() {
                RawValue::Single(value) if value.is_empty() => vec![],
                RawValue::Single(value) => vec![value],
                RawValue::Multiple(values) => values,
            };
            if values.is_empty() {
                return Err(Error::EmptyValueList {
                    attribute: attribute.to_string(),
                    operator,
                });
            }
            PreparedValue::List(
                values
                    .iter()
                    .map(|value| translate_value(value, condition.attribute_kind))
                    .collect(),
            )
        }
    };

    Ok(PreparedCondition {
        attribute,
        operator,
        token,
        value,
    })
}

/// The single value of a condition whose operator takes one.
fn single_value(condition: &Condition, attribute: &str) -> Result<String, Error> {
    match &condition.raw_value {
        RawValue::Single(value) => Ok(value.trim().to_string()),
        RawValue::Multiple(values) => match values.as_slice() {
            [] => Ok(String::new()),
            [value] => Ok(value.trim().to_string()),
            _ => Err(Error::UnexpectedValueList {
                attribute: attribute.to_string(),
                operator: condition.operator,
                count: values.len(),
            }),
        },
    }
}

/// The groups that take part in the compiled filter, each paired with the connective
/// joining it to what came before. The first participating group has none, whatever
/// it recorded; later groups that recorded none are joined with "and".
pub fn participating_groups(
    sequence: &FilterGroupSequence,
) -> impl Iterator<Item = (Option<Connective>, &FilterGroup)> {
    sequence
        .groups()
        .iter()
        .filter(|group| !group.conditions.is_empty())
        .enumerate()
        .map(|(index, group)| {
            let connective = if index == 0 {
                None
            } else {
                Some(group.inter_group_connective.unwrap_or_default())
            };
            (connective, group)
        })
}
