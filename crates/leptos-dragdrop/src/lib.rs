//! Leptos DragDrop Utilities
//!
//! HTML5 drag-and-drop for Leptos: a reactive drag session, sibling
//! placement math, and edge auto-scroll.

mod autoscroll;
mod placement;
mod session;

use std::fmt::Display;

use leptos::prelude::*;
use wasm_bindgen::JsCast;

pub use autoscroll::{
    classify, viewport_height, AutoScrollState, AutoScroller, ScrollDirection, ScrollTicker, WindowTicker,
    DEFAULT_EDGE_THRESHOLD_PX, DEFAULT_STEP_PX, DEFAULT_TICK_MS,
};
pub use placement::{insertion_index, reinsert, Axis, Span};
pub use session::{DragController, DragSession};

/// Reactive handle over a [`DragController`]
pub struct DndSignals<Id: Send + Sync + 'static, T: Send + Sync + 'static> {
    state: RwSignal<DragController<Id, T>>,
}

impl<Id: Send + Sync + 'static, T: Send + Sync + 'static> Clone for DndSignals<Id, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Id: Send + Sync + 'static, T: Send + Sync + 'static> Copy for DndSignals<Id, T> {}

pub fn create_dnd_signals<Id, T>() -> DndSignals<Id, T>
where
    Id: Clone + PartialEq + Send + Sync + 'static,
    T: Clone + PartialEq + Send + Sync + 'static,
{
    DndSignals { state: RwSignal::new(DragController::new()) }
}

impl<Id, T> DndSignals<Id, T>
where
    Id: Clone + PartialEq + Display + Send + Sync + 'static,
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// `dragstart`: open the session and mark the payload as a move
    pub fn start(&self, ev: &web_sys::DragEvent, id: Id) {
        if let Some(dt) = ev.data_transfer() {
            dt.set_effect_allowed("move");
            let _ = dt.set_data("text/plain", &id.to_string());
        }
        let (x, y) = (ev.client_x(), ev.client_y());
        self.state.update(|c| {
            c.begin(id, x, y);
        });
    }

    pub fn is_active(&self) -> bool {
        self.state.with_untracked(|c| c.is_active())
    }

    pub fn dragged(&self) -> Option<Id> {
        self.state.with_untracked(|c| c.dragged().cloned())
    }

    /// Tracked: for class bindings
    pub fn in_session(&self) -> bool {
        self.state.with(|c| c.is_active())
    }

    /// Tracked: for class bindings
    pub fn is_dragging(&self, id: &Id) -> bool {
        self.state.with(|c| c.is_dragging(id))
    }

    /// Tracked: for class bindings
    pub fn is_hovering(&self, target: &T) -> bool {
        self.state.with(|c| c.is_hovering(target))
    }

    /// `dragenter`
    pub fn enter(&self, target: T) {
        if self.state.with_untracked(|c| c.is_active() && !c.is_hovering(&target)) {
            self.state.update(|c| {
                c.enter(target);
            });
        }
    }

    /// `dragleave`: ignored while the pointer only moved into a child
    pub fn leave(&self, ev: &web_sys::DragEvent, target: &T) {
        if leaves_element(ev) {
            self.state.update(|c| c.leave(target));
        }
    }

    /// `drop`
    pub fn take_drop(&self, target: &T) -> Option<Id> {
        let mut dropped = None;
        self.state.update(|c| dropped = c.drop_on(target));
        dropped
    }

    /// `dragend`: the one guaranteed cleanup point
    pub fn end(&self) -> Option<DragSession<Id>> {
        let mut ended = None;
        self.state.update(|c| ended = c.end());
        ended
    }
}

/// True when a `dragleave` really exits the element (the related target is
/// outside it or missing).
pub fn leaves_element(ev: &web_sys::MouseEvent) -> bool {
    let current = ev.current_target().and_then(|t| t.dyn_into::<web_sys::Node>().ok());
    let related = ev.related_target().and_then(|t| t.dyn_into::<web_sys::Node>().ok());
    match (current, related) {
        (Some(current), Some(related)) => !current.contains(Some(&related)),
        _ => true,
    }
}

/// True when the event target sits inside `handle` and not inside `excluded`.
pub fn started_within(ev: &web_sys::Event, handle: &str, excluded: &str) -> bool {
    let Some(el) = ev.target().and_then(|t| t.dyn_into::<web_sys::Element>().ok()) else {
        return false;
    };
    if matches!(el.closest(excluded), Ok(Some(_))) {
        return false;
    }
    matches!(el.closest(handle), Ok(Some(_)))
}

/// True when the event was dispatched on the element handling it rather
/// than bubbling up from a descendant.
pub fn is_own_event(ev: &web_sys::Event) -> bool {
    match (ev.target(), ev.current_target()) {
        (Some(target), Some(current)) => target == current,
        _ => false,
    }
}

/// Create a `dragover` handler that keeps the element a valid drop target
pub fn make_on_dragover<F>(on_pointer: F) -> impl Fn(web_sys::DragEvent) + Clone + 'static
where
    F: Fn(&web_sys::DragEvent) + Clone + 'static,
{
    move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        if let Some(dt) = ev.data_transfer() {
            dt.set_drop_effect("move");
        }
        on_pointer(&ev);
    }
}
