//! Type definitions of a REST `$filter` expression AST.

/// A filter expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// and clause
    And {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// or clause
    Or {
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// not clause
    Not(Box<Expression>),
    /// A binary operation on two expressions
    BinaryOperation {
        left: Box<Expression>,
        operator: BinaryOperator,
        right: Box<Expression>,
    },
    /// An operation whose token already holds its right-hand side, such as `eq null`
    UnaryOperation {
        expression: Box<Expression>,
        operator: UnaryOperator,
    },
    /// A membership test against a list of values
    In {
        expression: Box<Expression>,
        values: Vec<Expression>,
    },
    /// A function call, such as `contains(name,'x')`
    FunctionCall {
        function: Function,
        args: Vec<Expression>,
    },
    /// A property of the queried record
    PropertyReference(PropertyName),
    /// An irreducible value
    Value(Value),
}

/// Binding strength of an expression, loosest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Or,
    And,
    Comparison,
    Not,
    Primary,
}

impl Expression {
    pub fn precedence(&self) -> Precedence {
        match self {
            Expression::Or { .. } => Precedence::Or,
            Expression::And { .. } => Precedence::And,
            Expression::BinaryOperation { .. }
            | Expression::UnaryOperation { .. }
            | Expression::In { .. } => Precedence::Comparison,
            Expression::Not(_) => Precedence::Not,
            Expression::FunctionCall { .. }
            | Expression::PropertyReference(_)
            | Expression::Value(_) => Precedence::Primary,
        }
    }
}

/// Represents the token of a binary operator, such as `eq` or `gt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryOperator(pub String);

/// Represents the token of a unary operator, such as `eq null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnaryOperator(pub String);

/// A filter function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function(pub String);

/// The logical name of a property
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyName(pub String);

/// Value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A quoted text literal
    String(String),
    /// A numeric literal, kept as written
    Number(String),
    Bool(bool),
    /// A date or date-time literal, kept as written
    Date(String),
    /// A GUID literal, kept as written
    Guid(String),
    Null,
}
