//! An interactive filter group editor.
//!
//! The editor owns the canonical filter structure, asks the attribute type resolver
//! what it knows about each attribute as it is typed, and hands its content to the
//! query compiler on request.

pub mod collaborators;
pub mod editor;
pub mod error;
pub mod resolver;
pub mod session;
pub mod value_editor;

pub use editor::{
    AttributeTrigger, ConditionId, ConditionRow, FilterGroupEditor, GroupId, GroupRow,
    ResolutionTicket, RowState,
};
pub use error::Error;
pub use resolver::AttributeTypeResolver;
pub use session::EditorSession;
pub use value_editor::{ValueEditor, ValueEditorKind, ValueSlot};
