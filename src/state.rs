//! Per-cycle state slots.
//!
//! A slot is identified by its position among the slots of a cycle, so
//! callers must declare slots unconditionally and in the same order on every
//! build. Values live for one cycle only: the setter is inert and does not
//! schedule another build.

use std::any::Any;
use std::marker::PhantomData;
use std::rc::Rc;

use log::{trace, warn};

use crate::builder::BuildContext;
use crate::scope;
use crate::stack::{StackItem, StateMarker};

/// Update handle of a state slot.
pub struct Setter<T> {
    slot: Option<usize>,
    _marker: PhantomData<fn(T)>,
}

impl<T> Setter<T> {
    fn new(slot: Option<usize>) -> Self {
        Self {
            slot,
            _marker: PhantomData,
        }
    }

    /// Position of the slot in its cycle, `None` if it was declared outside one.
    pub fn slot(&self) -> Option<usize> {
        self.slot
    }

    /// Accepts a new value. Updates are not applied and do not trigger a rebuild.
    pub fn set(&self, next: T) {
        trace!("state slot {:?} update ignored", self.slot);
        drop(next);
    }
}

impl<T> Clone for Setter<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Setter<T> {}

impl<T> std::fmt::Debug for Setter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Setter").field("slot", &self.slot).finish()
    }
}

impl BuildContext {
    /// Declare the next state slot of this build.
    ///
    /// Records a state marker holding the returned value; the marker and the
    /// caller share the same allocation.
    pub fn declare_state<T: 'static>(&mut self, initial: T) -> (Rc<T>, Setter<T>) {
        let value = Rc::new(initial);
        let slot = self.allocate_slot();
        let stored: Rc<dyn Any> = value.clone();
        self.buffer_mut()
            .push(StackItem::State(StateMarker::new(slot, stored)));
        (value, Setter::new(Some(slot)))
    }
}

/// Declare a state slot in the active build scope.
///
/// Outside of a build cycle nothing is recorded and the setter has no slot.
pub fn declare_state<T: 'static>(initial: T) -> (Rc<T>, Setter<T>) {
    let value = Rc::new(initial);
    let stored: Rc<dyn Any> = value.clone();
    let slot = scope::with_current(move |cx| {
        let slot = cx.allocate_slot();
        cx.buffer_mut()
            .push(StackItem::State(StateMarker::new(slot, stored)));
        slot
    });
    if slot.is_none() {
        warn!("state declared outside of a build cycle");
    }
    (value, Setter::new(slot))
}
