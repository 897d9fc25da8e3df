//! The seam to rendering engines.
//!
//! A finished build is handed over bottom-up: every node is created after
//! its children, and the top-level sequence is wrapped in a fragment that has
//! no representation of its own.

mod html;

pub use html::HtmlRenderer;

use crate::tag::Tag;
use crate::value::Props;

/// Consumer of reconstructed trees.
pub trait Renderer {
    type Output;

    /// Create one element from its tag, properties and already-rendered children.
    fn create_element(&mut self, tag: Tag, props: Props, children: Vec<Self::Output>)
        -> Self::Output;

    /// Wrap the top-level sequence of a build.
    fn fragment(&mut self, children: Vec<Self::Output>) -> Self::Output;

    /// Called by [`Root::render_to`](crate::Root::render_to) with the property
    /// name the root stores keys under, before any element is created.
    fn use_key_attribute(&mut self, _name: &str) {}
}
