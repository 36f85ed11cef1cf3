//! Drive an editor from user input, resolving attribute types as they are entered.
//!
//! A session is single-threaded: the editor is shared through `Rc<RefCell<_>>` and
//! is never borrowed across an `.await`. Resolutions that were overtaken by a later
//! edit are not cancelled; their results are simply dropped when they arrive.
//!
//! The session owns the editor's change callback and calls it after each edit, once
//! the editor is released, so the callback may read the editor or compile it.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;
use std::time::Duration;

use query_engine_metadata::metadata::FilterGroupSequence;
use query_engine_translation::translation::query::{compile, CompiledFilter};
use tracing::{info_span, Instrument};

use crate::collaborators::{AttributePicker, RecordTypeProvider};
use crate::editor::{AttributeTrigger, ConditionId, FilterGroupEditor, ResolutionTicket};
use crate::error::Error;
use crate::resolver::AttributeTypeResolver;

/// An editor together with the services it resolves attributes with.
pub struct EditorSession {
    editor: Rc<RefCell<FilterGroupEditor>>,
    on_changed: RefCell<Option<Box<dyn FnMut()>>>,
    /// The editor revision the callback was last called for.
    announced: Cell<u64>,
    resolver: AttributeTypeResolver,
    record_types: Rc<dyn RecordTypeProvider>,
    picker: Option<Rc<dyn AttributePicker>>,
    debounce: Duration,
}

impl EditorSession {
    pub fn new(
        mut editor: FilterGroupEditor,
        resolver: AttributeTypeResolver,
        record_types: Rc<dyn RecordTypeProvider>,
    ) -> Self {
        let debounce = editor.settings().resolve_debounce;
        let on_changed = editor.take_on_changed();
        let announced = editor.revision();
        EditorSession {
            editor: Rc::new(RefCell::new(editor)),
            on_changed: RefCell::new(on_changed),
            announced: Cell::new(announced),
            resolver,
            record_types,
            picker: None,
            debounce,
        }
    }

    pub fn with_picker(mut self, picker: Rc<dyn AttributePicker>) -> Self {
        self.picker = Some(picker);
        self
    }

    /// Read access to the editor.
    pub fn editor(&self) -> Ref<'_, FilterGroupEditor> {
        self.editor.borrow()
    }

    /// Apply an edit that needs no resolution. The change callback runs after the
    /// edit returns.
    pub fn edit<R>(&self, edit: impl FnOnce(&mut FilterGroupEditor) -> R) -> R {
        let result = edit(&mut *self.editor.borrow_mut());
        self.announce();
        result
    }

    /// A keystroke in an attribute field. Resolution starts once typing has paused for
    /// the debounce delay, unless a later edit comes first.
    ///
    /// Returns whether a resolution was applied.
    pub async fn attribute_typed(
        &self,
        condition: ConditionId,
        attribute_name: &str,
    ) -> Result<bool, Error> {
        let ticket = self.edit(|editor| {
            editor.set_attribute(condition, attribute_name, AttributeTrigger::Typed)
        })?;
        let Some(ticket) = ticket else {
            return Ok(false);
        };

        tokio::time::sleep(self.debounce).await;
        if !self.editor.borrow().is_current(&ticket) {
            tracing::debug!(
                condition = %ticket.condition,
                attribute_name = %ticket.attribute_name,
                "superseded while debouncing"
            );
            return Ok(false);
        }
        self.resolve(ticket).await
    }

    /// An attribute field lost focus. Resolution starts at once.
    pub async fn attribute_committed(
        &self,
        condition: ConditionId,
        attribute_name: &str,
    ) -> Result<bool, Error> {
        let ticket = self.edit(|editor| {
            editor.set_attribute(condition, attribute_name, AttributeTrigger::Committed)
        })?;
        match ticket {
            Some(ticket) => self.resolve(ticket).await,
            None => Ok(false),
        }
    }

    /// Let the user pick an attribute for a condition, as if it had been typed and
    /// committed. Returns the picked name; `None` when there is no picker, no record
    /// type, or the user dismissed it.
    pub async fn pick_attribute(&self, condition: ConditionId) -> Result<Option<String>, Error> {
        let Some(picker) = &self.picker else {
            return Ok(None);
        };
        let record_type = self
            .record_types
            .resolve_record_type()
            .await
            .filter(|record_type| !record_type.trim().is_empty());
        let Some(record_type) = record_type else {
            tracing::debug!(%condition, "no record type to pick attributes from");
            return Ok(None);
        };
        let Some(attribute_name) = picker
            .pick_attribute(&record_type)
            .instrument(info_span!("Pick attribute", %record_type))
            .await
        else {
            return Ok(None);
        };
        self.attribute_committed(condition, &attribute_name).await?;
        Ok(Some(attribute_name))
    }

    pub fn extract(&self) -> FilterGroupSequence {
        self.editor.borrow().extract()
    }

    /// Compile the current content in the editor's dialect.
    pub fn compile(&self) -> Result<CompiledFilter, Error> {
        let (sequence, dialect) = {
            let editor = self.editor.borrow();
            (editor.extract(), editor.dialect())
        };
        Ok(compile(&sequence, dialect)?)
    }

    /// Tear the editor down. Resolutions still in flight are dropped when they finish.
    pub fn dispose(&self) {
        self.editor.borrow_mut().dispose();
        // while the callback is running, `announce` drops it once it returns
        if let Ok(mut on_changed) = self.on_changed.try_borrow_mut() {
            *on_changed = None;
        }
    }

    async fn resolve(&self, ticket: ResolutionTicket) -> Result<bool, Error> {
        let info = self
            .resolver
            .resolve(&ticket.attribute_name, self.record_types.as_ref())
            .instrument(info_span!(
                "Resolve attribute type",
                condition = %ticket.condition,
                token = ticket.token
            ))
            .await;
        self.edit(|editor| {
            if editor.is_disposed() {
                Ok(false)
            } else {
                editor.apply_resolution(&ticket, info)
            }
        })
    }

    /// Call the change callback once for every change made since it was last called.
    fn announce(&self) {
        // an edit made from inside the callback is announced by the outer call
        let Ok(mut on_changed) = self.on_changed.try_borrow_mut() else {
            return;
        };
        loop {
            let (revision, disposed) = {
                let editor = self.editor.borrow();
                (editor.revision(), editor.is_disposed())
            };
            if disposed {
                *on_changed = None;
            }
            let Some(callback) = on_changed.as_mut() else {
                self.announced.set(revision);
                return;
            };
            if self.announced.get() >= revision {
                return;
            }
            self.announced.set(self.announced.get() + 1);
            callback();
        }
    }
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("editor", &self.editor)
            .field("announced", &self.announced)
            .field("resolver", &self.resolver)
            .field("debounce", &self.debounce)
            .finish_non_exhaustive()
    }
}
