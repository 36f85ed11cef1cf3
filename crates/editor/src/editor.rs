//! The filter group editor: groups of conditions, edited in place.
//!
//! The editor holds the canonical structure; widgets are drawn by a replaceable
//! [`ValueEditorRenderer`] that is told whenever a value slot's widget changes.
//! Every mutation that changes what the user sees invokes the change callback
//! exactly once; mutations that change nothing stay silent.

use std::fmt;

use filter_editor_configuration::EditorSettings;
use query_engine_metadata::metadata::{
    dialect_operators, AttributeKind, AttributeTypeInfo, ComparisonOperator, Condition,
    Connective, Dialect, FilterGroup, FilterGroupSequence, GroupConnective, OperatorShape,
    RawValue,
};

use crate::collaborators::ValueEditorRenderer;
use crate::error::Error;
use crate::value_editor::{ValueEditor, ValueSlot};

/// Identifies a group for the lifetime of an editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(u64);

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "group-{}", self.0)
    }
}

/// Identifies a condition for the lifetime of an editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConditionId(u64);

impl fmt::Display for ConditionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "condition-{}", self.0)
    }
}

/// What caused an attribute edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeTrigger {
    /// A keystroke. Resolution waits for typing to pause.
    Typed,
    /// The field lost focus, or an attribute was picked. Resolution starts at once.
    Committed,
}

/// Where a condition row is in resolving its attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowState {
    Empty,
    AttributePending,
    AutoDetected,
    FreeText,
}

/// Identifies one attribute edit. Only the latest edit of a condition may have its
/// resolution applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionTicket {
    pub condition: ConditionId,
    pub token: u64,
    /// The trimmed attribute name to resolve.
    pub attribute_name: String,
    pub trigger: AttributeTrigger,
}

/// One `attribute operator value` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionRow {
    id: ConditionId,
    attribute_name: String,
    operator: Option<ComparisonOperator>,
    value: RawValue,
    state: RowState,
    type_info: Option<AttributeTypeInfo>,
    operator_choices: Vec<ComparisonOperator>,
    value_editor: ValueEditor,
    request_token: u64,
}

impl ConditionRow {
    fn blank(id: ConditionId, dialect: Dialect) -> Self {
        let operator_choices: Vec<_> = dialect_operators(dialect).collect();
        let operator = operator_choices.first().copied();
        ConditionRow {
            id,
            attribute_name: String::new(),
            operator,
            value: RawValue::empty(),
            state: RowState::Empty,
            type_info: None,
            operator_choices,
            value_editor: ValueEditor::for_attribute(None, operator),
            request_token: 0,
        }
    }

    pub fn id(&self) -> ConditionId {
        self.id
    }

    /// The attribute name as typed, untrimmed.
    pub fn attribute_name(&self) -> &str {
        &self.attribute_name
    }

    pub fn operator(&self) -> Option<ComparisonOperator> {
        self.operator
    }

    pub fn value(&self) -> &RawValue {
        &self.value
    }

    pub fn state(&self) -> RowState {
        self.state
    }

    /// The type information the widget currently reflects.
    pub fn type_info(&self) -> Option<&AttributeTypeInfo> {
        self.type_info.as_ref()
    }

    /// The operators offered for this row, in registry order.
    pub fn operator_choices(&self) -> &[ComparisonOperator] {
        &self.operator_choices
    }

    pub fn value_editor(&self) -> &ValueEditor {
        &self.value_editor
    }

    /// The kind the compiler is told about; only detected attributes have one.
    pub fn attribute_kind(&self) -> AttributeKind {
        match (&self.state, &self.type_info) {
            (RowState::AutoDetected, Some(info)) => info.kind,
            _ => AttributeKind::Unknown,
        }
    }

    fn issue_ticket(&mut self, trigger: AttributeTrigger) -> ResolutionTicket {
        self.request_token += 1;
        ResolutionTicket {
            condition: self.id,
            token: self.request_token,
            attribute_name: self.attribute_name.trim().to_string(),
            trigger,
        }
    }

    /// Offer the given operators, keeping the selected one if it is among them.
    fn offer_operators(&mut self, choices: Vec<ComparisonOperator>) {
        self.operator = self
            .operator
            .filter(|operator| choices.contains(operator))
            .or_else(|| choices.first().copied());
        self.operator_choices = choices;
    }

    /// Drop what was known about the attribute's type.
    fn forget_type(&mut self, state: RowState, dialect: Dialect) -> bool {
        self.state = state;
        self.type_info = None;
        self.offer_operators(dialect_operators(dialect).collect());
        self.refresh_value_editor()
    }

    /// Bring the widget in line with the type and operator, reshaping or clearing the
    /// value to fit. Returns whether the widget changed.
    fn refresh_value_editor(&mut self) -> bool {
        let value_editor = ValueEditor::for_attribute(self.type_info.as_ref(), self.operator);
        self.value = if value_editor.enabled {
            value_editor.reshape(&self.value)
        } else {
            value_editor.empty_value()
        };
        let changed = value_editor != self.value_editor;
        self.value_editor = value_editor;
        changed
    }

    /// Whether two rows look the same to the user, ignoring resolution bookkeeping.
    fn same_view(&self, other: &ConditionRow) -> bool {
        self.attribute_name == other.attribute_name
            && self.operator == other.operator
            && self.value == other.value
            && self.operator_choices == other.operator_choices
            && self.value_editor == other.value_editor
            && self.attribute_kind() == other.attribute_kind()
    }

    /// The condition as the compiler should see it, if it is complete.
    fn to_condition(&self) -> Option<Condition> {
        let attribute_name = self.attribute_name.trim();
        let operator = self.operator?;
        if attribute_name.is_empty() {
            return None;
        }
        let raw_value = if operator.requires_value() {
            self.value.trimmed()
        } else {
            RawValue::empty()
        };
        // nothing checked yet
        if operator.shape() == OperatorShape::List && raw_value.is_empty() {
            return None;
        }
        Some(Condition::new(attribute_name, operator, raw_value).with_kind(self.attribute_kind()))
    }
}

/// A group of condition rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRow {
    id: GroupId,
    connective: GroupConnective,
    inter_group_connective: Option<Connective>,
    conditions: Vec<ConditionRow>,
}

impl GroupRow {
    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn connective(&self) -> GroupConnective {
        self.connective
    }

    /// `None` for the first group.
    pub fn inter_group_connective(&self) -> Option<Connective> {
        self.inter_group_connective
    }

    pub fn conditions(&self) -> &[ConditionRow] {
        &self.conditions
    }
}

/// Edits a sequence of filter groups.
pub struct FilterGroupEditor {
    settings: EditorSettings,
    groups: Vec<GroupRow>,
    /// The first group ever added. Never reassigned, even once that group is removed.
    pinned: Option<GroupId>,
    next_id: u64,
    /// Counts visible changes.
    revision: u64,
    on_changed: Option<Box<dyn FnMut()>>,
    renderer: Option<Box<dyn ValueEditorRenderer>>,
    disposed: bool,
}

impl FilterGroupEditor {
    pub fn new(settings: EditorSettings) -> Self {
        FilterGroupEditor {
            settings,
            groups: vec![],
            pinned: None,
            next_id: 0,
            revision: 0,
            on_changed: None,
            renderer: None,
            disposed: false,
        }
    }

    /// Set the callback invoked once per visible change. An editor driven by an
    /// [`EditorSession`](crate::EditorSession) hands the callback to the session, which
    /// calls it once the editor is no longer borrowed.
    pub fn with_on_changed(mut self, on_changed: impl FnMut() + 'static) -> Self {
        self.on_changed = Some(Box::new(on_changed));
        self
    }

    pub fn with_renderer(mut self, renderer: impl ValueEditorRenderer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn dialect(&self) -> Dialect {
        self.settings.dialect
    }

    pub fn groups(&self) -> &[GroupRow] {
        &self.groups
    }

    pub fn group(&self, group: GroupId) -> Option<&GroupRow> {
        self.groups.iter().find(|row| row.id == group)
    }

    pub fn condition(&self, condition: ConditionId) -> Option<&ConditionRow> {
        self.groups
            .iter()
            .flat_map(|group| group.conditions.iter())
            .find(|row| row.id == condition)
    }

    /// The group that is cleared rather than removed when it loses its last condition.
    pub fn pinned_group(&self) -> Option<GroupId> {
        self.pinned
    }

    /// The number of visible changes made so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub(crate) fn take_on_changed(&mut self) -> Option<Box<dyn FnMut()>> {
        self.on_changed.take()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Add a group holding one empty condition, at the end or at the start.
    pub fn add_group(&mut self, at_end: bool) -> Result<GroupId, Error> {
        self.ensure_live()?;
        let id = GroupId(self.fresh_id());
        let row = ConditionRow::blank(ConditionId(self.fresh_id()), self.dialect());
        let joined_with = Some(self.settings.default_inter_group_connective);
        let mut group = GroupRow {
            id,
            connective: GroupConnective::default(),
            inter_group_connective: None,
            conditions: vec![row],
        };

        let index = if at_end || self.groups.is_empty() {
            if !self.groups.is_empty() {
                group.inter_group_connective = joined_with;
            }
            self.groups.push(group);
            self.groups.len() - 1
        } else {
            if let Some(first) = self.groups.first_mut() {
                first.inter_group_connective = joined_with;
            }
            self.groups.insert(0, group);
            0
        };

        if self.pinned.is_none() {
            tracing::debug!(group = %id, "pinned first group");
            self.pinned = Some(id);
        }
        self.render(index, 0);
        self.notify();
        Ok(id)
    }

    /// Add an empty condition to a group, at the end or at the start.
    pub fn add_condition(&mut self, group: GroupId, at_end: bool) -> Result<ConditionId, Error> {
        self.ensure_live()?;
        let group_index = self.group_index(group)?;
        let id = ConditionId(self.fresh_id());
        let row = ConditionRow::blank(id, self.dialect());
        let conditions = &mut self.groups[group_index].conditions;
        let index = if at_end {
            conditions.push(row);
            conditions.len() - 1
        } else {
            conditions.insert(0, row);
            0
        };
        self.render(group_index, index);
        self.notify();
        Ok(id)
    }

    /// Remove a condition. A group losing its last condition is removed too, except for
    /// the pinned group, whose last condition is cleared instead so that there is always
    /// a row to type into.
    pub fn remove_condition(
        &mut self,
        group: GroupId,
        condition: ConditionId,
    ) -> Result<(), Error> {
        self.ensure_live()?;
        let group_index = self.group_index(group)?;
        let condition_index = self.groups[group_index]
            .conditions
            .iter()
            .position(|row| row.id == condition)
            .ok_or(Error::ConditionNotInGroup { group, condition })?;

        if self.groups[group_index].conditions.len() > 1 {
            self.groups[group_index].conditions.remove(condition_index);
        } else if self.pinned == Some(group) {
            let dialect = self.dialect();
            let row = &mut self.groups[group_index].conditions[condition_index];
            let mut blank = ConditionRow::blank(row.id, dialect);
            // outstanding resolutions for the old attribute become stale
            blank.request_token = row.request_token + 1;
            let changed = !row.same_view(&blank);
            let widget_changed = row.value_editor != blank.value_editor;
            *row = blank;
            if widget_changed {
                self.render(group_index, condition_index);
            }
            if !changed {
                return Ok(());
            }
        } else {
            self.remove_group_at(group_index);
        }
        self.notify();
        Ok(())
    }

    /// Remove a group along with the connective joining it to its neighbours.
    pub fn remove_group(&mut self, group: GroupId) -> Result<(), Error> {
        self.ensure_live()?;
        let group_index = self.group_index(group)?;
        self.remove_group_at(group_index);
        self.notify();
        Ok(())
    }

    /// Update the attribute name of a condition.
    ///
    /// Returns a ticket when the name should be resolved; names that are empty or too
    /// short are treated as free text straight away.
    pub fn set_attribute(
        &mut self,
        condition: ConditionId,
        attribute_name: &str,
        trigger: AttributeTrigger,
    ) -> Result<Option<ResolutionTicket>, Error> {
        self.ensure_live()?;
        let dialect = self.dialect();
        let min_attribute_length = self.settings.min_attribute_length;
        let (group_index, condition_index) = self.locate(condition)?;
        let row = &mut self.groups[group_index].conditions[condition_index];

        if row.attribute_name == attribute_name {
            // committing a name that is still waiting on its debounce resolves it now
            if trigger == AttributeTrigger::Committed && row.state == RowState::AttributePending {
                return Ok(Some(row.issue_ticket(trigger)));
            }
            return Ok(None);
        }

        row.attribute_name = attribute_name.to_string();
        let trimmed = attribute_name.trim();
        let (ticket, widget_changed) = if trimmed.is_empty() {
            row.request_token += 1;
            (None, row.forget_type(RowState::Empty, dialect))
        } else if trimmed.chars().count() < min_attribute_length {
            row.request_token += 1;
            (None, row.forget_type(RowState::FreeText, dialect))
        } else {
            row.state = RowState::AttributePending;
            (Some(row.issue_ticket(trigger)), false)
        };

        if widget_changed {
            self.render(group_index, condition_index);
        }
        self.notify();
        Ok(ticket)
    }

    /// Select an operator. Operators that take no value clear the value and disable
    /// the value editor.
    pub fn set_operator(
        &mut self,
        condition: ConditionId,
        operator: ComparisonOperator,
    ) -> Result<(), Error> {
        self.ensure_live()?;
        let (group_index, condition_index) = self.locate(condition)?;
        let row = &mut self.groups[group_index].conditions[condition_index];
        if !row.operator_choices.contains(&operator) {
            return Err(Error::OperatorNotOffered {
                condition,
                operator,
            });
        }
        if row.operator == Some(operator) {
            return Ok(());
        }
        row.operator = Some(operator);
        if row.refresh_value_editor() {
            self.render(group_index, condition_index);
        }
        self.notify();
        Ok(())
    }

    pub fn set_value(
        &mut self,
        condition: ConditionId,
        value: impl Into<RawValue>,
    ) -> Result<(), Error> {
        self.ensure_live()?;
        let (group_index, condition_index) = self.locate(condition)?;
        let row = &mut self.groups[group_index].conditions[condition_index];
        if !row.value_editor.enabled {
            return Err(Error::ValueEditorDisabled(condition));
        }
        let value = row.value_editor.reshape(&value.into());
        if row.value == value {
            return Ok(());
        }
        row.value = value;
        self.notify();
        Ok(())
    }

    pub fn set_group_connective(
        &mut self,
        group: GroupId,
        connective: GroupConnective,
    ) -> Result<(), Error> {
        self.ensure_live()?;
        let group_index = self.group_index(group)?;
        if self.groups[group_index].connective == connective {
            return Ok(());
        }
        self.groups[group_index].connective = connective;
        self.notify();
        Ok(())
    }

    /// Change how a group joins the groups before it.
    pub fn set_inter_group_connective(
        &mut self,
        group: GroupId,
        connective: Connective,
    ) -> Result<(), Error> {
        self.ensure_live()?;
        let group_index = self.group_index(group)?;
        if group_index == 0 {
            return Err(Error::FirstGroupHasNoConnective(group));
        }
        if self.groups[group_index].inter_group_connective == Some(connective) {
            return Ok(());
        }
        self.groups[group_index].inter_group_connective = Some(connective);
        self.notify();
        Ok(())
    }

    /// Whether a ticket belongs to the latest attribute edit of a condition that is
    /// still waiting for its type.
    pub fn is_current(&self, ticket: &ResolutionTicket) -> bool {
        !self.disposed
            && self.condition(ticket.condition).is_some_and(|row| {
                row.state == RowState::AttributePending && row.request_token == ticket.token
            })
    }

    /// Apply the result of resolving a ticket's attribute. `None` means the attribute
    /// is of unknown type.
    ///
    /// Returns `false` without changing anything when the ticket has been superseded.
    pub fn apply_resolution(
        &mut self,
        ticket: &ResolutionTicket,
        info: Option<AttributeTypeInfo>,
    ) -> Result<bool, Error> {
        self.ensure_live()?;
        if !self.is_current(ticket) {
            tracing::debug!(
                condition = %ticket.condition,
                token = ticket.token,
                attribute_name = %ticket.attribute_name,
                "dropping stale resolution"
            );
            return Ok(false);
        }

        let dialect = self.dialect();
        let (group_index, condition_index) = self.locate(ticket.condition)?;
        let row = &mut self.groups[group_index].conditions[condition_index];
        let before = row.clone();

        let widget_changed = match info {
            Some(info) => {
                let allowed = if info.allowed_operator_ids.is_empty() {
                    info.kind.comparison_operators().into_iter().collect()
                } else {
                    info.allowed_operators()
                };
                row.offer_operators(
                    allowed
                        .into_iter()
                        .filter(|operator| operator.is_available_in(dialect))
                        .collect(),
                );
                row.state = RowState::AutoDetected;
                row.type_info = Some(info);
                row.refresh_value_editor()
            }
            None => row.forget_type(RowState::FreeText, dialect),
        };
        tracing::debug!(
            condition = %ticket.condition,
            attribute_name = %ticket.attribute_name,
            kind = ?row.attribute_kind(),
            "applied attribute type"
        );

        let changed = !row.same_view(&before);
        if widget_changed {
            self.render(group_index, condition_index);
        }
        if changed {
            self.notify();
        }
        Ok(true)
    }

    /// The canonical filter, in visual order. Incomplete conditions and groups left
    /// without conditions are excluded.
    pub fn extract(&self) -> FilterGroupSequence {
        let mut groups: Vec<FilterGroup> = vec![];
        for group in &self.groups {
            let conditions: Vec<Condition> = group
                .conditions
                .iter()
                .filter_map(ConditionRow::to_condition)
                .collect();
            if conditions.is_empty() {
                continue;
            }
            let mut extracted = FilterGroup::new(group.connective, conditions);
            if !groups.is_empty() {
                extracted.inter_group_connective = Some(
                    group
                        .inter_group_connective
                        .unwrap_or(self.settings.default_inter_group_connective),
                );
            }
            groups.push(extracted);
        }
        FilterGroupSequence(groups)
    }

    /// Detach the change callback and the renderer and drop all groups. Calling it
    /// again does nothing.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        tracing::debug!(groups = self.groups.len(), "disposing filter group editor");
        self.disposed = true;
        self.on_changed = None;
        self.renderer = None;
        self.groups.clear();
    }

    fn ensure_live(&self) -> Result<(), Error> {
        if self.disposed {
            Err(Error::Disposed)
        } else {
            Ok(())
        }
    }

    fn fresh_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn group_index(&self, group: GroupId) -> Result<usize, Error> {
        self.groups
            .iter()
            .position(|row| row.id == group)
            .ok_or(Error::UnknownGroup(group))
    }

    fn locate(&self, condition: ConditionId) -> Result<(usize, usize), Error> {
        self.groups
            .iter()
            .enumerate()
            .find_map(|(group_index, group)| {
                group
                    .conditions
                    .iter()
                    .position(|row| row.id == condition)
                    .map(|condition_index| (group_index, condition_index))
            })
            .ok_or(Error::UnknownCondition(condition))
    }

    fn remove_group_at(&mut self, group_index: usize) {
        let removed = self.groups.remove(group_index);
        tracing::debug!(group = %removed.id, "removed group");
        // the new first group loses the connective joining it to the removed one
        if let Some(first) = self.groups.first_mut() {
            first.inter_group_connective = None;
        }
    }

    fn render(&self, group_index: usize, condition_index: usize) {
        let Some(renderer) = &self.renderer else {
            return;
        };
        let group = &self.groups[group_index];
        let row = &group.conditions[condition_index];
        renderer.render_value_editor(
            ValueSlot {
                group: group.id,
                condition: row.id,
            },
            &row.value_editor,
        );
    }

    fn notify(&mut self) {
        self.revision += 1;
        if let Some(on_changed) = self.on_changed.as_mut() {
            on_changed();
        }
    }
}

impl fmt::Debug for FilterGroupEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterGroupEditor")
            .field("settings", &self.settings)
            .field("groups", &self.groups)
            .field("pinned", &self.pinned)
            .field("revision", &self.revision)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use query_engine_metadata::metadata::OptionSetOption;

    use super::*;

    fn counting_editor() -> (FilterGroupEditor, Rc<Cell<usize>>) {
        let changes = Rc::new(Cell::new(0));
        let counter = changes.clone();
        let editor = FilterGroupEditor::new(EditorSettings::default())
            .with_on_changed(move || counter.set(counter.get() + 1));
        (editor, changes)
    }

    fn first_condition(editor: &FilterGroupEditor, group: GroupId) -> ConditionId {
        editor.group(group).unwrap().conditions()[0].id()
    }

    fn statecode() -> AttributeTypeInfo {
        AttributeTypeInfo::new("statecode", AttributeKind::OptionSet).with_options(vec![
            OptionSetOption {
                value: "0".to_string(),
                label: "Active".to_string(),
            },
            OptionSetOption {
                value: "1".to_string(),
                label: "Inactive".to_string(),
            },
        ])
    }

    #[test]
    fn new_groups_hold_one_blank_condition() {
        let (mut editor, changes) = counting_editor();
        let group = editor.add_group(true).unwrap();
        let row = &editor.group(group).unwrap().conditions()[0];
        assert_eq!(row.state(), RowState::Empty);
        assert_eq!(row.operator(), Some(ComparisonOperator::Equals));
        assert_eq!(row.value(), &RawValue::empty());
        assert_eq!(editor.pinned_group(), Some(group));
        assert_eq!(changes.get(), 1);
    }

    #[test]
    fn groups_added_later_are_joined_with_the_default_connective() {
        let (mut editor, _) = counting_editor();
        let first = editor.add_group(true).unwrap();
        let second = editor.add_group(true).unwrap();
        let front = editor.add_group(false).unwrap();

        let order: Vec<_> = editor.groups().iter().map(GroupRow::id).collect();
        assert_eq!(order, vec![front, first, second]);
        let connectives: Vec<_> = editor
            .groups()
            .iter()
            .map(GroupRow::inter_group_connective)
            .collect();
        assert_eq!(
            connectives,
            vec![None, Some(Connective::And), Some(Connective::And)]
        );
        // pinning follows the first group added, not the first group shown
        assert_eq!(editor.pinned_group(), Some(first));
    }

    #[test]
    fn removing_the_last_condition_of_the_pinned_group_clears_it() {
        let (mut editor, changes) = counting_editor();
        let group = editor.add_group(true).unwrap();
        let condition = first_condition(&editor, group);
        editor
            .set_attribute(condition, "name", AttributeTrigger::Committed)
            .unwrap();
        editor.set_value(condition, "Contoso").unwrap();
        changes.set(0);

        editor.remove_condition(group, condition).unwrap();

        let row = editor.condition(condition).unwrap();
        assert_eq!(row.attribute_name(), "");
        assert_eq!(row.value(), &RawValue::empty());
        assert_eq!(row.state(), RowState::Empty);
        assert_eq!(editor.groups().len(), 1);
        assert_eq!(changes.get(), 1);

        // clearing an already blank row is not a change
        editor.remove_condition(group, condition).unwrap();
        assert_eq!(changes.get(), 1);
        assert_eq!(editor.groups().len(), 1);
    }

    #[test]
    fn removing_the_last_condition_of_another_group_removes_the_group() {
        let (mut editor, _) = counting_editor();
        let first = editor.add_group(true).unwrap();
        let second = editor.add_group(true).unwrap();
        let third = editor.add_group(true).unwrap();
        editor
            .set_inter_group_connective(third, Connective::Or)
            .unwrap();

        editor
            .remove_condition(second, first_condition(&editor, second))
            .unwrap();

        let order: Vec<_> = editor.groups().iter().map(GroupRow::id).collect();
        assert_eq!(order, vec![first, third]);
        assert_eq!(
            editor.group(third).unwrap().inter_group_connective(),
            Some(Connective::Or)
        );
    }

    #[test]
    fn removing_the_first_group_drops_the_following_connective() {
        let (mut editor, _) = counting_editor();
        let first = editor.add_group(true).unwrap();
        let second = editor.add_group(true).unwrap();
        editor.remove_group(first).unwrap();

        assert_eq!(editor.group(second).unwrap().inter_group_connective(), None);
        // the pinned group is gone and no other group takes its place
        assert_eq!(editor.pinned_group(), Some(first));
        editor
            .remove_condition(second, first_condition(&editor, second))
            .unwrap();
        assert!(editor.groups().is_empty());
    }

    #[test]
    fn short_names_are_free_text_without_resolution() {
        let (mut editor, _) = counting_editor();
        let group = editor.add_group(true).unwrap();
        let condition = first_condition(&editor, group);

        let ticket = editor
            .set_attribute(condition, "ab", AttributeTrigger::Typed)
            .unwrap();
        assert_eq!(ticket, None);
        assert_eq!(editor.condition(condition).unwrap().state(), RowState::FreeText);

        let ticket = editor
            .set_attribute(condition, "abc", AttributeTrigger::Typed)
            .unwrap()
            .unwrap();
        assert_eq!(ticket.attribute_name, "abc");
        assert_eq!(
            editor.condition(condition).unwrap().state(),
            RowState::AttributePending
        );

        editor
            .set_attribute(condition, "  ", AttributeTrigger::Typed)
            .unwrap();
        assert_eq!(editor.condition(condition).unwrap().state(), RowState::Empty);
        assert!(!editor.is_current(&ticket));
    }

    #[test]
    fn stale_resolutions_lose() {
        let (mut editor, _) = counting_editor();
        let group = editor.add_group(true).unwrap();
        let condition = first_condition(&editor, group);

        let stale = editor
            .set_attribute(condition, "statecode", AttributeTrigger::Typed)
            .unwrap()
            .unwrap();
        let latest = editor
            .set_attribute(condition, "revenue", AttributeTrigger::Typed)
            .unwrap()
            .unwrap();
        assert!(latest.token > stale.token);

        // the later edit resolves first; the earlier one completing afterwards is ignored
        let revenue = AttributeTypeInfo::new("revenue", AttributeKind::Number);
        assert!(editor.apply_resolution(&latest, Some(revenue)).unwrap());
        assert!(!editor.apply_resolution(&stale, Some(statecode())).unwrap());

        let row = editor.condition(condition).unwrap();
        assert_eq!(row.attribute_kind(), AttributeKind::Number);
        assert_eq!(row.state(), RowState::AutoDetected);
    }

    #[test]
    fn committing_a_pending_name_supersedes_its_debounced_ticket() {
        let (mut editor, changes) = counting_editor();
        let group = editor.add_group(true).unwrap();
        let condition = first_condition(&editor, group);

        let typed = editor
            .set_attribute(condition, "name", AttributeTrigger::Typed)
            .unwrap()
            .unwrap();
        changes.set(0);
        let committed = editor
            .set_attribute(condition, "name", AttributeTrigger::Committed)
            .unwrap()
            .unwrap();
        assert_eq!(committed.trigger, AttributeTrigger::Committed);
        assert!(!editor.is_current(&typed));
        assert!(editor.is_current(&committed));
        assert_eq!(changes.get(), 0);
    }

    #[test]
    fn resolution_refilters_operators_and_keeps_a_valid_selection() {
        let (mut editor, changes) = counting_editor();
        let group = editor.add_group(true).unwrap();
        let condition = first_condition(&editor, group);
        editor.set_operator(condition, ComparisonOperator::In).unwrap();
        let ticket = editor
            .set_attribute(condition, "statecode", AttributeTrigger::Committed)
            .unwrap()
            .unwrap();
        changes.set(0);

        editor.apply_resolution(&ticket, Some(statecode())).unwrap();

        let row = editor.condition(condition).unwrap();
        assert_eq!(row.operator(), Some(ComparisonOperator::In));
        assert_eq!(
            row.operator_choices(),
            &[
                ComparisonOperator::Equals,
                ComparisonOperator::NotEquals,
                ComparisonOperator::IsNull,
                ComparisonOperator::IsNotNull,
                ComparisonOperator::In,
            ]
        );
        assert!(row.value_editor().is_multi_select());
        assert_eq!(row.value(), &RawValue::Multiple(vec![]));
        assert_eq!(changes.get(), 1);
    }

    #[test]
    fn resolution_falls_back_to_the_first_allowed_operator() {
        let (mut editor, _) = counting_editor();
        let group = editor.add_group(true).unwrap();
        let condition = first_condition(&editor, group);
        editor
            .set_operator(condition, ComparisonOperator::Contains)
            .unwrap();
        let ticket = editor
            .set_attribute(condition, "revenue", AttributeTrigger::Committed)
            .unwrap()
            .unwrap();
        editor
            .apply_resolution(
                &ticket,
                Some(AttributeTypeInfo::new("revenue", AttributeKind::Number)),
            )
            .unwrap();
        assert_eq!(
            editor.condition(condition).unwrap().operator(),
            Some(ComparisonOperator::Equals)
        );
    }

    #[test]
    fn metadata_misses_are_unknown_attributes() {
        let (mut editor, changes) = counting_editor();
        let group = editor.add_group(true).unwrap();
        let condition = first_condition(&editor, group);
        let ticket = editor
            .set_attribute(condition, "x_custom", AttributeTrigger::Committed)
            .unwrap()
            .unwrap();
        changes.set(0);

        assert!(editor.apply_resolution(&ticket, None).unwrap());
        let row = editor.condition(condition).unwrap();
        assert_eq!(row.state(), RowState::FreeText);
        assert_eq!(row.attribute_kind(), AttributeKind::Unknown);
        assert_eq!(row.operator_choices().len(), 13);
        // nothing the user sees has changed
        assert_eq!(changes.get(), 0);
    }

    #[test]
    fn null_tests_clear_and_disable_the_value() {
        let (mut editor, changes) = counting_editor();
        let group = editor.add_group(true).unwrap();
        let condition = first_condition(&editor, group);
        editor.set_value(condition, "stray").unwrap();
        changes.set(0);

        editor
            .set_operator(condition, ComparisonOperator::IsNull)
            .unwrap();
        let row = editor.condition(condition).unwrap();
        assert_eq!(row.value(), &RawValue::empty());
        assert!(!row.value_editor().enabled);
        assert_eq!(changes.get(), 1);

        assert_eq!(
            editor.set_value(condition, "again"),
            Err(Error::ValueEditorDisabled(condition))
        );
        // selecting the same operator again is not a change
        editor
            .set_operator(condition, ComparisonOperator::IsNull)
            .unwrap();
        assert_eq!(changes.get(), 1);
    }

    #[test]
    fn operators_outside_the_offered_choices_are_rejected() {
        let (mut editor, _) = counting_editor();
        let group = editor.add_group(true).unwrap();
        let condition = first_condition(&editor, group);
        assert_eq!(
            editor.set_operator(condition, ComparisonOperator::LastXDays),
            Err(Error::OperatorNotOffered {
                condition,
                operator: ComparisonOperator::LastXDays
            })
        );
    }

    #[test]
    fn no_op_edits_do_not_notify() {
        let (mut editor, changes) = counting_editor();
        let first = editor.add_group(true).unwrap();
        let second = editor.add_group(true).unwrap();
        let condition = first_condition(&editor, first);
        changes.set(0);

        editor.set_value(condition, "").unwrap();
        editor
            .set_group_connective(first, GroupConnective::And)
            .unwrap();
        editor
            .set_inter_group_connective(second, Connective::And)
            .unwrap();
        editor
            .set_attribute(condition, "", AttributeTrigger::Committed)
            .unwrap();
        assert_eq!(changes.get(), 0);

        editor
            .set_group_connective(first, GroupConnective::Not)
            .unwrap();
        assert_eq!(changes.get(), 1);
    }

    #[test]
    fn the_first_group_has_no_inter_group_connective() {
        let (mut editor, _) = counting_editor();
        let first = editor.add_group(true).unwrap();
        assert_eq!(
            editor.set_inter_group_connective(first, Connective::Or),
            Err(Error::FirstGroupHasNoConnective(first))
        );
    }

    #[test]
    fn extract_skips_incomplete_conditions_and_empty_groups() {
        let (mut editor, _) = counting_editor();
        let first = editor.add_group(true).unwrap();
        let second = editor.add_group(true).unwrap();
        editor.set_inter_group_connective(second, Connective::Or).unwrap();
        let condition = first_condition(&editor, second);
        editor
            .set_attribute(condition, "  name ", AttributeTrigger::Committed)
            .unwrap();
        editor.set_value(condition, " Contoso ").unwrap();
        let incomplete = editor.add_condition(second, true).unwrap();
        editor.set_value(incomplete, "orphan").unwrap();

        let sequence = editor.extract();
        assert_eq!(
            sequence,
            FilterGroupSequence(vec![FilterGroup::new(
                GroupConnective::And,
                vec![Condition::new("name", ComparisonOperator::Equals, "Contoso")]
            )])
        );
        assert!(editor.group(first).is_some());
    }

    #[test]
    fn extract_records_detected_kinds() {
        let (mut editor, _) = counting_editor();
        let group = editor.add_group(true).unwrap();
        let condition = first_condition(&editor, group);
        let ticket = editor
            .set_attribute(condition, "revenue", AttributeTrigger::Committed)
            .unwrap()
            .unwrap();
        editor
            .apply_resolution(
                &ticket,
                Some(AttributeTypeInfo::new("revenue", AttributeKind::Number)),
            )
            .unwrap();
        editor
            .set_operator(condition, ComparisonOperator::GreaterThan)
            .unwrap();
        editor.set_value(condition, "1000").unwrap();

        let sequence = editor.extract();
        assert_eq!(
            sequence.groups()[0].conditions[0],
            Condition::new("revenue", ComparisonOperator::GreaterThan, "1000")
                .with_kind(AttributeKind::Number)
        );
    }

    #[test]
    fn list_operators_without_values_are_incomplete() {
        let (mut editor, _) = counting_editor();
        let group = editor.add_group(true).unwrap();
        let condition = first_condition(&editor, group);
        editor
            .set_attribute(condition, "city", AttributeTrigger::Committed)
            .unwrap();
        editor.set_operator(condition, ComparisonOperator::In).unwrap();
        assert!(editor.extract().is_empty());

        editor.set_value(condition, "Oslo").unwrap();
        assert_eq!(editor.extract().groups().len(), 1);
    }

    #[test]
    fn dispose_is_idempotent() {
        let (mut editor, changes) = counting_editor();
        editor.dispose();
        editor.dispose();
        assert!(editor.is_disposed());
        assert_eq!(editor.add_group(true), Err(Error::Disposed));
        assert!(editor.extract().is_empty());
        assert_eq!(changes.get(), 0);

        let (mut editor, changes) = counting_editor();
        let group = editor.add_group(true).unwrap();
        let condition = first_condition(&editor, group);
        let ticket = editor
            .set_attribute(condition, "name", AttributeTrigger::Typed)
            .unwrap()
            .unwrap();
        editor.dispose();
        assert!(!editor.is_current(&ticket));
        assert_eq!(changes.get(), 2);
        assert_eq!(editor.revision(), 2);
    }
}
