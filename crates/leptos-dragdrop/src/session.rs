//! Drag Session State
//!
//! Plain state behind the HTML5 drag-and-drop handlers. Holds at most one
//! session at a time plus the drop target currently under the pointer.

/// A single in-flight drag, from `dragstart` to its `dragend`.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession<Id> {
    pub dragged: Id,
    pub start_x: i32,
    pub start_y: i32,
}

/// Owns the active drag session and the highlighted drop target.
///
/// `Id` is what gets dragged, `T` is what it can be dropped on.
#[derive(Clone, Debug, PartialEq)]
pub struct DragController<Id, T> {
    session: Option<DragSession<Id>>,
    hover: Option<T>,
}

impl<Id, T> Default for DragController<Id, T> {
    fn default() -> Self {
        Self { session: None, hover: None }
    }
}

impl<Id: Clone + PartialEq, T: Clone + PartialEq> DragController<Id, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a session. Returns the session it replaced, if a previous one
    /// never saw its `dragend`.
    pub fn begin(&mut self, dragged: Id, start_x: i32, start_y: i32) -> Option<DragSession<Id>> {
        self.hover = None;
        self.session.replace(DragSession { dragged, start_x, start_y })
    }

    pub fn session(&self) -> Option<&DragSession<Id>> {
        self.session.as_ref()
    }

    pub fn dragged(&self) -> Option<&Id> {
        self.session.as_ref().map(|s| &s.dragged)
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_dragging(&self, id: &Id) -> bool {
        self.dragged() == Some(id)
    }

    pub fn hover(&self) -> Option<&T> {
        self.hover.as_ref()
    }

    pub fn is_hovering(&self, target: &T) -> bool {
        self.hover.as_ref() == Some(target)
    }

    /// Highlight `target`. Ignored when nothing is being dragged.
    pub fn enter(&mut self, target: T) -> bool {
        if !self.is_active() {
            return false;
        }
        self.hover = Some(target);
        true
    }

    /// Clear the highlight if it still belongs to `target`.
    pub fn leave(&mut self, target: &T) {
        if self.hover.as_ref() == Some(target) {
            self.hover = None;
        }
    }

    /// Resolve a drop on `target`. The session itself stays alive until
    /// [`DragController::end`].
    pub fn drop_on(&mut self, target: &T) -> Option<Id> {
        self.leave(target);
        self.dragged().cloned()
    }

    /// Tear the session down. Safe to call with no active session.
    pub fn end(&mut self) -> Option<DragSession<Id>> {
        self.hover = None;
        self.session.take()
    }
}
