//! Active build scopes.
//!
//! The ambient tag functions (`div(None, || ...)`) take no context argument,
//! so the driver lends its [`BuildContext`] to a per-thread scope stack while
//! the root builder runs. Builders always record into the innermost scope;
//! a cycle started from inside another one pushes its own scope and never
//! sees the outer buffer. Explicit-context cycles push a barrier, so ambient
//! builders called during them record nothing.

use std::cell::RefCell;

use crate::builder::BuildContext;

thread_local! {
    // `None` entries are barriers.
    static SCOPES: RefCell<Vec<Option<BuildContext>>> = const { RefCell::new(Vec::new()) };
}

/// Run `f` against the innermost active scope.
///
/// Returns `None` when no ambient build cycle is active on this thread,
/// including when the innermost cycle is an explicit-context one. `f` must
/// not re-enter the scope stack.
pub(crate) fn with_current<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut BuildContext) -> R,
{
    SCOPES.with(|scopes| scopes.borrow_mut().last_mut().and_then(Option::as_mut).map(f))
}

/// Whether ambient builders on this thread currently record anywhere.
pub fn is_recording() -> bool {
    SCOPES.with(|scopes| matches!(scopes.borrow().last(), Some(Some(_))))
}

/// Number of nested build cycles currently recording on this thread.
pub fn depth() -> usize {
    SCOPES.with(|scopes| scopes.borrow().len())
}

/// Lends a context to the scope stack and returns it on drop, including
/// when the root builder unwinds.
pub(crate) struct ScopeGuard<'a> {
    home: Option<&'a mut BuildContext>,
}

impl<'a> ScopeGuard<'a> {
    pub(crate) fn enter(home: &'a mut BuildContext) -> Self {
        let cx = std::mem::take(home);
        SCOPES.with(|scopes| scopes.borrow_mut().push(Some(cx)));
        Self { home: Some(home) }
    }

    /// Hide every outer scope until dropped.
    pub(crate) fn barrier() -> Self {
        SCOPES.with(|scopes| scopes.borrow_mut().push(None));
        Self { home: None }
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        let entry = SCOPES.with(|scopes| scopes.borrow_mut().pop());
        if let (Some(home), Some(Some(cx))) = (self.home.as_deref_mut(), entry) {
            *home = cx;
        }
    }
}
