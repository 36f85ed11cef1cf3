//! Errors for editor operations.

use query_engine_metadata::metadata::ComparisonOperator;
use thiserror::Error;

use crate::editor::{ConditionId, GroupId};

/// Errors raised when the editor is asked to do something its structure does not allow.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    #[error("no group with id {0}")]
    UnknownGroup(GroupId),
    #[error("no condition with id {0}")]
    UnknownCondition(ConditionId),
    #[error("condition {condition} does not belong to group {group}")]
    ConditionNotInGroup {
        group: GroupId,
        condition: ConditionId,
    },
    #[error("operator {operator} is not offered for condition {condition}")]
    OperatorNotOffered {
        condition: ConditionId,
        operator: ComparisonOperator,
    },
    #[error("the value editor of condition {0} is disabled")]
    ValueEditorDisabled(ConditionId),
    #[error("group {0} is the first group and has no inter-group connective")]
    FirstGroupHasNoConnective(GroupId),
    #[error("the editor has been disposed")]
    Disposed,
    #[error("unable to compile the filter: {0}")]
    Translation(#[from] query_engine_translation::translation::error::Error),
}
