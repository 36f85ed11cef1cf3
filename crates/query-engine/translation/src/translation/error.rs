//! Errors for filter translation.

use query_engine_metadata::metadata::{ComparisonOperator, Dialect};
use thiserror::Error;

/// A filter that cannot be compiled. These indicate a sequence that did not come
/// from the editor's `extract()`, and should be surfaced rather than ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("operator '{operator}' is not available in the {dialect} dialect")]
    OperatorNotInDialect {
        operator: ComparisonOperator,
        dialect: Dialect,
    },
    #[error("a condition using operator '{0}' has no attribute name")]
    MissingAttribute(ComparisonOperator),
    #[error("condition on '{attribute}' uses '{operator}', which takes a single value, but {count} values were given")]
    UnexpectedValueList {
        attribute: String,
        operator: ComparisonOperator,
        count: usize,
    },
    #[error("condition on '{attribute}' uses '{operator}', but no values were given")]
    EmptyValueList {
        attribute: String,
        operator: ComparisonOperator,
    },
}
