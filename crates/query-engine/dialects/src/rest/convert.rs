//! Convert a REST filter AST to a filter string.

use super::ast::*;
use super::string::Filter;

/// Render an expression as a `$filter` string.
pub fn expression_to_filter(expression: &Expression) -> Filter {
    let mut filter = Filter::new();
    expression.to_rest(&mut filter);
    filter
}

impl Expression {
    pub fn to_rest(&self, filter: &mut Filter) {
        match &self {
            Expression::And { left, right } => {
                left.to_rest_within(Precedence::And, filter);
                filter.append_syntax(" and ");
                right.to_rest_within(Precedence::And, filter);
            }
            Expression::Or { left, right } => {
                left.to_rest_within(Precedence::Or, filter);
                filter.append_syntax(" or ");
                right.to_rest_within(Precedence::Or, filter);
            }
            Expression::Not(expression) => {
                filter.append_syntax("not ");
                expression.to_rest_within(Precedence::Not, filter);
            }
            Expression::BinaryOperation {
                left,
                operator,
                right,
            } => {
                left.to_rest_within(Precedence::Primary, filter);
                filter.append_syntax(" ");
                operator.to_rest(filter);
                filter.append_syntax(" ");
                right.to_rest_within(Precedence::Primary, filter);
            }
            Expression::UnaryOperation {
                expression,
                operator,
            } => {
                expression.to_rest_within(Precedence::Primary, filter);
                filter.append_syntax(" ");
                operator.to_rest(filter);
            }
            Expression::In { expression, values } => {
                expression.to_rest_within(Precedence::Primary, filter);
                filter.append_syntax(" in (");
                for (index, value) in values.iter().enumerate() {
                    value.to_rest(filter);
                    if index < (values.len() - 1) {
                        filter.append_syntax(",");
                    }
                }
                filter.append_syntax(")");
            }
            Expression::FunctionCall { function, args } => {
                function.to_rest(filter);
                filter.append_syntax("(");
                for (index, arg) in args.iter().enumerate() {
                    arg.to_rest(filter);
                    if index < (args.len() - 1) {
                        filter.append_syntax(",");
                    }
                }
                filter.append_syntax(")");
            }
            Expression::PropertyReference(property) => property.to_rest(filter),
            Expression::Value(value) => value.to_rest(filter),
        }
    }

    /// Render as the operand of an operator binding with `context` strength,
    /// parenthesising when this expression binds more loosely.
    fn to_rest_within(&self, context: Precedence, filter: &mut Filter) {
        if self.precedence() < context {
            filter.append_syntax("(");
            self.to_rest(filter);
            filter.append_syntax(")");
        } else {
            self.to_rest(filter);
        }
    }
}

impl BinaryOperator {
    pub fn to_rest(&self, filter: &mut Filter) {
        let BinaryOperator(token) = self;
        filter.append_syntax(token);
    }
}

impl UnaryOperator {
    pub fn to_rest(&self, filter: &mut Filter) {
        let UnaryOperator(token) = self;
        filter.append_syntax(token);
    }
}

impl Function {
    pub fn to_rest(&self, filter: &mut Filter) {
        let Function(name) = self;
        filter.append_syntax(name);
    }
}

impl PropertyName {
    pub fn to_rest(&self, filter: &mut Filter) {
        let PropertyName(name) = self;
        filter.append_identifier(name);
    }
}

impl Value {
    pub fn to_rest(&self, filter: &mut Filter) {
        match &self {
            Value::String(text) => filter.append_string_literal(text),
            Value::Number(number) => filter.append_syntax(number),
            Value::Bool(true) => filter.append_syntax("true"),
            Value::Bool(false) => filter.append_syntax("false"),
            Value::Date(date) => filter.append_syntax(date),
            Value::Guid(guid) => filter.append_syntax(guid),
            Value::Null => filter.append_syntax("null"),
        }
    }
}
