//! Translate the canonical model into an XML `<filter>` fragment.

use query_engine_dialects::xml::ast::{Condition, ConditionValue, Filter, FilterItem, FilterType};
use query_engine_metadata::metadata::{
    Connective, Dialect, FilterGroup, FilterGroupSequence, GroupConnective, OperatorShape,
    Wildcard,
};

use super::filtering::{participating_groups, prepare_condition, PreparedCondition, PreparedValue};
use super::values::Literal;
use crate::translation::error::Error;

/// Translate a whole sequence. `None` when no group has any conditions.
///
/// Groups are chained left to right; a chain step whose connective matches the
/// type of an operand absorbs that operand's items instead of nesting it.
pub fn translate_sequence(sequence: &FilterGroupSequence) -> Result<Option<Filter>, Error> {
    let mut chain: Option<FilterItem> = None;
    for (connective, group) in participating_groups(sequence) {
        let item = translate_group(group)?;
        chain = Some(match chain {
            None => item,
            Some(previous) => {
                let filter_type = match connective.unwrap_or_default() {
                    Connective::And => FilterType::And,
                    Connective::Or => FilterType::Or,
                };
                let mut items = absorb(previous, filter_type);
                items.extend(absorb(item, filter_type));
                FilterItem::Filter(Filter { filter_type, items })
            }
        });
    }

    Ok(chain.map(|item| match item {
        FilterItem::Filter(filter) => filter,
        condition @ FilterItem::Condition(_) => Filter {
            filter_type: FilterType::And,
            items: vec![condition],
        },
    }))
}

/// The items to place directly inside a filter of type `filter_type`.
fn absorb(item: FilterItem, filter_type: FilterType) -> Vec<FilterItem> {
    match item {
        FilterItem::Filter(filter) if filter.filter_type == filter_type => filter.items,
        other => vec![other],
    }
}

/// A group becomes a filter of its own type; a lone condition in an "and" or "or"
/// group needs no wrapper.
fn translate_group(group: &FilterGroup) -> Result<FilterItem, Error> {
    let mut items = group
        .conditions
        .iter()
        .map(|condition| {
            prepare_condition(condition, Dialect::Xml)
                .map(|c| FilterItem::Condition(translate_condition(&c)))
        })
        .collect::<Result<Vec<_>, Error>>()?;

    let filter_type = match group.connective {
        GroupConnective::And => FilterType::And,
        GroupConnective::Or => FilterType::Or,
        GroupConnective::Not => FilterType::Not,
    };
    if filter_type != FilterType::Not && items.len() == 1 {
        if let Some(item) = items.pop() {
            return Ok(item);
        }
    }
    Ok(FilterItem::Filter(Filter { filter_type, items }))
}

fn translate_condition(condition: &PreparedCondition) -> Condition {
    let value = match &condition.value {
        PreparedValue::None => ConditionValue::None,
        PreparedValue::Single(literal) => match condition.operator.shape() {
            OperatorShape::Substring { wildcard, .. } => {
                ConditionValue::Attribute(like_pattern(&literal_text(literal), wildcard))
            }
            _ => ConditionValue::Attribute(literal_text(literal)),
        },
        PreparedValue::List(literals) => {
            ConditionValue::Elements(literals.iter().map(literal_text).collect())
        }
    };
    Condition {
        attribute: condition.attribute.to_string(),
        operator: condition.token.to_string(),
        value,
    }
}

fn literal_text(literal: &Literal) -> String {
    match literal {
        Literal::Text(text)
        | Literal::Number(text)
        | Literal::Date(text)
        | Literal::Guid(text) => text.clone(),
        Literal::Boolean(true) => "1".to_string(),
        Literal::Boolean(false) => "0".to_string(),
    }
}

/// Build a `like` pattern, bracketing the characters `like` would otherwise interpret.
fn like_pattern(text: &str, wildcard: Wildcard) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    for c in text.chars() {
        match c {
            '%' | '_' | '[' => {
                escaped.push('[');
                escaped.push(c);
                escaped.push(']');
            }
            _ => escaped.push(c),
        }
    }
    match wildcard {
        Wildcard::Anywhere => format!("%{escaped}%"),
        Wildcard::Prefix => format!("{escaped}%"),
        Wildcard::Suffix => format!("%{escaped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_patterns_escape_wildcards() {
        assert_eq!(like_pattern("50%_off", Wildcard::Anywhere), "%50[%][_]off%");
        assert_eq!(like_pattern("[draft]", Wildcard::Prefix), "[[]draft]%");
        assert_eq!(like_pattern("inc", Wildcard::Suffix), "%inc");
    }
}
