//! The recording buffer.
//!
//! A build cycle appends a flat, ordered log of [`StackItem`]s. Order encodes
//! both sibling order and nesting: a parent is recorded as
//! `Begin, Element(opens_parent), <descendants>, End`, a leaf as a single
//! `Element`. The reconstructor turns the log back into a tree.

use std::any::Any;
use std::rc::Rc;

use crate::tag::Tag;
use crate::value::Props;

/// Bracket delimiting the descendants of the element recorded right after `Begin`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    Begin,
    End,
}

/// A recorded element.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementDescriptor {
    pub tag: Tag,
    pub props: Props,
    /// Set by the factory when the element's descendants follow it, bracketed
    /// by `Begin`/`End`.
    pub opens_parent: bool,
}

/// A recorded state slot. Holds the same allocation that was handed to the caller.
#[derive(Clone)]
pub struct StateMarker {
    pub slot: usize,
    value: Rc<dyn Any>,
}

impl StateMarker {
    pub(crate) fn new(slot: usize, value: Rc<dyn Any>) -> Self {
        Self { slot, value }
    }

    /// The slot's value, if it holds a `T`.
    pub fn value<T: 'static>(&self) -> Option<Rc<T>> {
        self.value.clone().downcast::<T>().ok()
    }
}

impl std::fmt::Debug for StateMarker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMarker")
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

/// One entry of the recording buffer.
#[derive(Clone, Debug)]
pub enum StackItem {
    Boundary(Boundary),
    Element(ElementDescriptor),
    State(StateMarker),
}

impl StackItem {
    pub fn is_boundary(&self, boundary: Boundary) -> bool {
        matches!(self, StackItem::Boundary(b) if *b == boundary)
    }
}

/// Ordered log of one build cycle.
#[derive(Debug, Default)]
pub struct RecordingBuffer {
    items: Vec<StackItem>,
}

impl RecordingBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item. Exposed for callers that drive the protocol by hand;
    /// nothing is checked until reconstruction.
    pub fn push(&mut self, item: StackItem) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[StackItem] {
        &self.items
    }

    pub fn last(&self) -> Option<&StackItem> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Move the recorded items out, leaving the buffer empty.
    pub fn take(&mut self) -> Vec<StackItem> {
        std::mem::take(&mut self.items)
    }
}
