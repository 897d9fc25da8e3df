use log::warn;

use crate::scope;
use crate::tag::Tag;
use crate::value::{PropValue, Props};

/// Marker type for closures describing nested children
pub struct NestedChildren;

/// Marker type for literal leaf content
pub struct LeafChildren;

/// Marker type for an element without children
pub struct NoChildren;

/// Trait for values accepted as the `children` argument of a builder.
///
/// The marker parameter disambiguates between:
/// - closures (`|| { ... }`), recorded as a parent with nested descendants - `NestedChildren`
/// - anything convertible into a [`PropValue`], recorded as a leaf - `LeafChildren`
/// - `()`, recorded as a leaf without a `children` property - `NoChildren`
pub trait IntoChildren<Marker = LeafChildren> {
    /// Record `tag` with these children into the active build scope.
    fn record(self, tag: Tag, props: Option<Props>);
}

// The closure runs synchronously between `Begin` and `End`, so whatever it
// records lands inside this parent.
impl<F> IntoChildren<NestedChildren> for F
where
    F: FnOnce(),
{
    fn record(self, tag: Tag, props: Option<Props>) {
        let opened = scope::with_current(|cx| cx.open(tag, props)).is_some();
        if !opened {
            warn!("<{tag}> built outside of an ambient build cycle, element dropped");
        }

        self();

        if opened && scope::with_current(|cx| cx.close()).is_none() {
            warn!("build scope of <{tag}> ended before its children completed");
        }
    }
}

impl<T> IntoChildren<LeafChildren> for T
where
    T: Into<PropValue>,
{
    fn record(self, tag: Tag, props: Option<Props>) {
        let value = self.into();
        if scope::with_current(|cx| cx.leaf(tag, props, Some(value))).is_none() {
            warn!("<{tag}> built outside of an ambient build cycle, element dropped");
        }
    }
}

impl IntoChildren<NoChildren> for () {
    fn record(self, tag: Tag, props: Option<Props>) {
        if scope::with_current(|cx| cx.leaf(tag, props, None)).is_none() {
            warn!("<{tag}> built outside of an ambient build cycle, element dropped");
        }
    }
}
