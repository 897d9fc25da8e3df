//! The root driver.
//!
//! One cycle is: clear the buffer, run the root builder, reconstruct the tree
//! and hand it to a renderer. A [`Root`] reuses its buffer between cycles but
//! nothing recorded in one cycle survives into the next.

use std::cell::RefCell;

use log::{debug, warn};

use crate::builder::BuildContext;
use crate::config::RootConfig;
use crate::error::{BuildError, Result};
use crate::reconstruct::{reconstruct, Fragment};
use crate::render::Renderer;
use crate::scope::ScopeGuard;

thread_local! {
    static DEFAULT_ROOT: RefCell<Root> = RefCell::new(Root::new());
}

/// Whether a root is between cycles or running one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CyclePhase {
    Idle,
    Recording,
}

/// Drives build cycles.
pub struct Root {
    config: RootConfig,
    cx: BuildContext,
    phase: CyclePhase,
    last_slot_count: Option<usize>,
}

impl Default for Root {
    fn default() -> Self {
        Self::new()
    }
}

impl Root {
    pub fn new() -> Self {
        Self::with_config(RootConfig::default())
    }

    pub fn with_config(config: RootConfig) -> Self {
        Self {
            config,
            cx: BuildContext::new(),
            phase: CyclePhase::Idle,
            last_slot_count: None,
        }
    }

    pub fn key_attribute(mut self, name: impl Into<String>) -> Self {
        self.config.key_attribute = name.into();
        self
    }

    pub fn validate(mut self, validate: bool) -> Self {
        self.config.validate = validate;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    pub fn config(&self) -> &RootConfig {
        &self.config
    }

    pub fn phase(&self) -> CyclePhase {
        self.phase
    }

    /// Run one cycle with the ambient builders (`div`, `h1`, `declare_state`, ...)
    /// recording into this root.
    ///
    /// # Example
    /// ```
    /// use stackdom::{div, h1, Root};
    ///
    /// let fragment = Root::new()
    ///     .run_cycle(|| {
    ///         div(None, || {
    ///             h1(None, "Hello");
    ///         });
    ///     })
    ///     .unwrap();
    /// assert_eq!(fragment.depth(), 2);
    /// ```
    pub fn run_cycle<F: FnOnce()>(&mut self, root: F) -> Result<Fragment> {
        self.begin_cycle();
        {
            let _scope = ScopeGuard::enter(&mut self.cx);
            root();
        }
        self.finish_cycle()
    }

    /// Run one cycle recording through an explicitly passed context.
    ///
    /// Ambient builders called from `root` record nothing, neither here nor
    /// in an enclosing cycle.
    pub fn build<F: FnOnce(&mut BuildContext)>(&mut self, root: F) -> Result<Fragment> {
        self.begin_cycle();
        {
            let _barrier = ScopeGuard::barrier();
            root(&mut self.cx);
        }
        self.finish_cycle()
    }

    /// Run one ambient cycle and hand the result to `renderer`.
    pub fn render_to<R, F>(&mut self, renderer: &mut R, root: F) -> Result<R::Output>
    where
        R: Renderer,
        F: FnOnce(),
    {
        let fragment = self.run_cycle(root)?;
        renderer.use_key_attribute(&self.config.key_attribute);
        Ok(fragment.render(renderer))
    }

    fn begin_cycle(&mut self) {
        if self.phase == CyclePhase::Recording {
            warn!("previous build cycle did not complete, discarding its recording");
        }
        self.cx.reset();
        self.phase = CyclePhase::Recording;
    }

    fn finish_cycle(&mut self) -> Result<Fragment> {
        let slots = self.cx.slot_count();
        if let Some(previous) = self.last_slot_count {
            if previous != slots {
                warn!(
                    "state slot count changed between cycles ({previous} -> {slots}), \
                     declare state unconditionally and in a stable order"
                );
            }
        }
        self.last_slot_count = Some(slots);

        let items = self.cx.take_items();
        let recorded = items.len();
        self.cx.reset();
        self.phase = CyclePhase::Idle;

        let fragment = reconstruct(items, &self.config)?;
        debug!(
            "build cycle recorded {recorded} items, {} nodes, {slots} state slots",
            fragment.count()
        );
        Ok(fragment)
    }
}

/// Run one cycle on this thread's default [`Root`].
///
/// Calling it again from inside `root` fails with [`BuildError::Reentrant`];
/// use a separate [`Root`] for nested builds.
pub fn render<F: FnOnce()>(root: F) -> Result<Fragment> {
    DEFAULT_ROOT.with(|default| {
        let mut default = default.try_borrow_mut().map_err(|_| BuildError::Reentrant)?;
        default.run_cycle(root)
    })
}

/// Like [`render`], handing the result to `renderer`.
pub fn render_to<R, F>(renderer: &mut R, root: F) -> Result<R::Output>
where
    R: Renderer,
    F: FnOnce(),
{
    let fragment = render(root)?;
    DEFAULT_ROOT.with(|default| {
        if let Ok(default) = default.try_borrow() {
            renderer.use_key_attribute(&default.config.key_attribute);
        }
    });
    Ok(fragment.render(renderer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StructuralError;
    use crate::tag::{div, h1, li, ol, span, Tag};
    use crate::value::PropValue;

    #[test]
    fn test_phase_returns_to_idle() {
        let mut root = Root::new();
        assert_eq!(root.phase(), CyclePhase::Idle);
        root.run_cycle(|| span(None, "x")).unwrap();
        assert_eq!(root.phase(), CyclePhase::Idle);
    }

    #[test]
    fn test_run_cycle_nests_by_call_order() {
        let fragment = Root::new()
            .run_cycle(|| {
                div(None, || {
                    div(None, || {
                        h1(None, "x");
                    });
                });
            })
            .unwrap();

        assert_eq!(fragment.len(), 1);
        let outer = &fragment.nodes[0];
        assert_eq!(outer.tag, Tag::Div);
        assert_eq!(outer.children.len(), 1);
        let inner = &outer.children[0];
        assert_eq!(inner.tag, Tag::Div);
        assert_eq!(inner.children.len(), 1);
        assert_eq!(inner.children[0].tag, Tag::H1);
        assert_eq!(inner.children[0].text(), Some(&PropValue::from("x")));
    }

    #[test]
    fn test_build_with_explicit_context() {
        let fragment = Root::new()
            .build(|cx| {
                cx.parent(Tag::Ol, None, |cx| {
                    cx.leaf(Tag::Li, None, Some("one".into()));
                    cx.leaf(Tag::Li, None, Some("two".into()));
                });
            })
            .unwrap();
        assert_eq!(fragment.nodes[0].children.len(), 2);
    }

    #[test]
    fn test_consecutive_cycles_do_not_leak() {
        let mut root = Root::new();
        let first = root
            .run_cycle(|| {
                ol(None, || {
                    li(None, "a");
                    li(None, "b");
                });
            })
            .unwrap();
        assert_eq!(first.count(), 3);

        let second = root.run_cycle(|| span(None, "only")).unwrap();
        assert_eq!(second.count(), 1);
        assert_eq!(second.nodes[0].tag, Tag::Span);
        assert_eq!(second.nodes[0].prop("key"), Some(&PropValue::Int(1)));
    }

    #[test]
    fn test_unclosed_parent_is_rejected() {
        let err = Root::new()
            .build(|cx| {
                cx.open(Tag::Div, None);
                cx.leaf(Tag::Span, None, None);
            })
            .unwrap_err();
        assert_eq!(
            err,
            BuildError::Structural(StructuralError::UnclosedParent {
                tag: Tag::Div,
                position: 0
            })
        );
    }

    #[test]
    fn test_default_root_rejects_reentry() {
        let mut inner = None;
        let outer = render(|| {
            inner = Some(render(|| span(None, "nested")));
            span(None, "outer");
        })
        .unwrap();

        assert_eq!(inner, Some(Err(BuildError::Reentrant)));
        assert_eq!(outer.count(), 1);
    }

    #[test]
    fn test_separate_root_builds_independently_inside_a_cycle() {
        let mut nested = None;
        let outer = Root::new()
            .run_cycle(|| {
                div(None, || {
                    nested = Some(Root::new().run_cycle(|| {
                        li(None, "inner");
                    }));
                    span(None, "after");
                });
            })
            .unwrap();

        let nested = nested.unwrap().unwrap();
        assert_eq!(nested.count(), 1);
        assert_eq!(nested.nodes[0].tag, Tag::Li);

        let div = &outer.nodes[0];
        assert_eq!(div.children.len(), 1);
        assert_eq!(div.children[0].tag, Tag::Span);
    }

    #[test]
    fn test_slot_count_is_tracked_across_cycles() {
        let mut root = Root::new();
        assert_eq!(root.last_slot_count, None);

        root.run_cycle(|| {
            let (count, _) = crate::state::declare_state(0);
            span(None, *count);
        })
        .unwrap();
        assert_eq!(root.last_slot_count, Some(1));

        // A changed slot count is reported but the cycle still completes.
        let fragment = root
            .run_cycle(|| {
                let (count, _) = crate::state::declare_state(0);
                let (label, _) = crate::state::declare_state("x");
                span(None, *count);
                span(None, *label);
            })
            .unwrap();
        assert_eq!(root.last_slot_count, Some(2));
        assert_eq!(fragment.len(), 2);
    }

    #[test]
    fn test_explicit_build_hides_outer_cycle() {
        let mut inner = None;
        let outer = Root::new()
            .run_cycle(|| {
                inner = Some(Root::new().build(|cx| {
                    span(None, "ambient");
                    cx.leaf(Tag::Li, None, Some("explicit".into()));
                }));
                div(None, ());
            })
            .unwrap();

        let inner = inner.unwrap().unwrap();
        assert_eq!(inner.count(), 1);
        assert_eq!(inner.nodes[0].tag, Tag::Li);
        assert_eq!(outer.count(), 1);
        assert_eq!(outer.nodes[0].tag, Tag::Div);
    }

    #[test]
    fn test_panicking_root_leaves_root_reusable() {
        let mut root = Root::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            root.run_cycle(|| {
                div(None, || {
                    span(None, "before");
                    panic!("builder failed");
                });
            })
        }));
        assert!(result.is_err());
        assert_eq!(root.phase(), CyclePhase::Recording);
        assert!(!crate::scope::is_recording());

        let fragment = root.run_cycle(|| span(None, "fresh")).unwrap();
        assert_eq!(fragment.count(), 1);
        assert_eq!(root.phase(), CyclePhase::Idle);
    }
}
