//! The element factory.
//!
//! [`BuildContext`] owns the recording buffer of one build. It can be driven
//! directly (context passing) or installed as the active scope so the ambient
//! tag functions (`div`, `h1`, ...) record into it.

use crate::children::IntoChildren;
use crate::stack::{Boundary, ElementDescriptor, RecordingBuffer, StackItem};
use crate::tag::Tag;
use crate::value::{PropValue, Props, CHILDREN_PROP};

/// Caller-owned recording state for one build cycle.
#[derive(Debug, Default)]
pub struct BuildContext {
    buffer: RecordingBuffer,
    next_slot: usize,
}

impl BuildContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &RecordingBuffer {
        &self.buffer
    }

    /// Raw access to the buffer, for protocols built on top of this one.
    pub fn buffer_mut(&mut self) -> &mut RecordingBuffer {
        &mut self.buffer
    }

    /// Number of state slots declared since the last reset.
    pub fn slot_count(&self) -> usize {
        self.next_slot
    }

    /// Forget everything recorded so far.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.next_slot = 0;
    }

    /// Record a leaf element. `children`, when given, becomes the element's
    /// `children` property and overrides one passed in `props`.
    pub fn leaf(&mut self, tag: Tag, props: Option<Props>, children: Option<PropValue>) {
        let mut props = props.unwrap_or_default();
        if let Some(children) = children {
            props.insert(CHILDREN_PROP, children);
        }
        self.buffer.push(StackItem::Element(ElementDescriptor {
            tag,
            props,
            opens_parent: false,
        }));
    }

    /// Record a parent element whose descendants are recorded by `children`.
    pub fn parent<F>(&mut self, tag: Tag, props: Option<Props>, children: F)
    where
        F: FnOnce(&mut BuildContext),
    {
        self.open(tag, props);
        children(self);
        self.close();
    }

    /// Open a parent element. Everything recorded until the matching
    /// [`close`](Self::close) becomes its descendants.
    pub fn open(&mut self, tag: Tag, props: Option<Props>) {
        self.buffer.push(StackItem::Boundary(Boundary::Begin));
        self.buffer.push(StackItem::Element(ElementDescriptor {
            tag,
            props: props.unwrap_or_default(),
            opens_parent: true,
        }));
    }

    /// Close the innermost open parent.
    pub fn close(&mut self) {
        self.buffer.push(StackItem::Boundary(Boundary::End));
    }

    pub(crate) fn allocate_slot(&mut self) -> usize {
        let slot = self.next_slot;
        self.next_slot += 1;
        slot
    }

    pub(crate) fn take_items(&mut self) -> Vec<StackItem> {
        self.buffer.take()
    }
}

/// Builder function for one tag, recording into the active build scope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Builder {
    tag: Tag,
}

impl Builder {
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// Record an element. A closure as `children` nests whatever it records;
    /// a plain value makes a leaf; `()` makes a leaf without content.
    pub fn build<M>(&self, props: Option<Props>, children: impl IntoChildren<M>) {
        children.record(self.tag, props);
    }
}

/// Create the builder for `tag`.
pub fn make_builder(tag: Tag) -> Builder {
    Builder { tag }
}
