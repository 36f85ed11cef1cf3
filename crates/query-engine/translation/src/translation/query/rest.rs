//! Translate the canonical model into a REST `$filter` expression.

use query_engine_dialects::rest::ast::{Expression, Value};
use query_engine_dialects::rest::helpers;
use query_engine_metadata::metadata::{
    Connective, Dialect, FilterGroup, FilterGroupSequence, GroupConnective, OperatorShape,
};

use super::filtering::{participating_groups, prepare_condition, PreparedCondition, PreparedValue};
use super::values::Literal;
use crate::translation::error::Error;

/// Translate a whole sequence. `None` when no group has any conditions.
pub fn translate_sequence(sequence: &FilterGroupSequence) -> Result<Option<Expression>, Error> {
    let mut chain: Option<Expression> = None;
    for (connective, group) in participating_groups(sequence) {
        let Some(expression) = translate_group(group)? else {
            continue;
        };
        chain = Some(match chain {
            None => expression,
            Some(previous) => match connective.unwrap_or_default() {
                Connective::And => helpers::and(previous, expression),
                Connective::Or => helpers::or(previous, expression),
            },
        });
    }
    Ok(chain)
}

/// Join a group's conditions with its own connective. A "not" group is negated as a unit.
fn translate_group(group: &FilterGroup) -> Result<Option<Expression>, Error> {
    let conditions = group
        .conditions
        .iter()
        .map(|condition| {
            prepare_condition(condition, Dialect::Rest).map(|c| translate_condition(&c))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(match group.connective {
        GroupConnective::And => helpers::conjunction(conditions),
        GroupConnective::Or => helpers::disjunction(conditions),
        GroupConnective::Not => helpers::conjunction(conditions).map(helpers::not),
    })
}

fn translate_condition(condition: &PreparedCondition) -> Expression {
    let property = helpers::property(condition.attribute);
    match &condition.value {
        PreparedValue::None => helpers::unary(property, condition.token),
        PreparedValue::Single(literal) => match condition.operator.shape() {
            OperatorShape::Substring { .. } => {
                // "not contains" is the negation of "contains"
                let (negated, function) = match condition.token.strip_prefix("not ") {
                    Some(function) => (true, function),
                    None => (false, condition.token),
                };
                let call = helpers::function_call(
                    function,
                    vec![property, Expression::Value(translate_literal(literal))],
                );
                if negated {
                    helpers::not(call)
                } else {
                    call
                }
            }
            _ => helpers::binary(
                property,
                condition.token,
                Expression::Value(translate_literal(literal)),
            ),
        },
        PreparedValue::List(literals) => Expression::In {
            expression: Box::new(property),
            values: literals
                .iter()
                .map(|literal| Expression::Value(translate_literal(literal)))
                .collect(),
        },
    }
}

fn translate_literal(literal: &Literal) -> Value {
    match literal {
        Literal::Text(text) => Value::String(text.clone()),
        Literal::Number(number) => Value::Number(number.clone()),
        Literal::Boolean(b) => Value::Bool(*b),
        Literal::Date(date) => Value::Date(date.clone()),
        Literal::Guid(guid) => Value::Guid(guid.clone()),
    }
}
