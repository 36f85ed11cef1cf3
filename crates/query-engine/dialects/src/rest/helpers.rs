//! Helpers for building rest::ast types in certain shapes and patterns.

use super::ast::*;

/// A reference to a property of the queried record.
pub fn property(name: &str) -> Expression {
    Expression::PropertyReference(PropertyName(name.to_string()))
}

/// `<left> <operator> <right>`
pub fn binary(left: Expression, operator: &str, right: Expression) -> Expression {
    Expression::BinaryOperation {
        left: Box::new(left),
        operator: BinaryOperator(operator.to_string()),
        right: Box::new(right),
    }
}

/// `<expression> <operator>`
pub fn unary(expression: Expression, operator: &str) -> Expression {
    Expression::UnaryOperation {
        expression: Box::new(expression),
        operator: UnaryOperator(operator.to_string()),
    }
}

/// `<function>(<args>)`
pub fn function_call(function: &str, args: Vec<Expression>) -> Expression {
    Expression::FunctionCall {
        function: Function(function.to_string()),
        args,
    }
}

pub fn and(left: Expression, right: Expression) -> Expression {
    Expression::And {
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub fn or(left: Expression, right: Expression) -> Expression {
    Expression::Or {
        left: Box::new(left),
        right: Box::new(right),
    }
}

pub fn not(expression: Expression) -> Expression {
    Expression::Not(Box::new(expression))
}

/// Join expressions left to right with `and`. `None` when there is nothing to join.
pub fn conjunction(expressions: impl IntoIterator<Item = Expression>) -> Option<Expression> {
    expressions.into_iter().reduce(and)
}

/// Join expressions left to right with `or`. `None` when there is nothing to join.
pub fn disjunction(expressions: impl IntoIterator<Item = Expression>) -> Option<Expression> {
    expressions.into_iter().reduce(or)
}
