//! Declarative element trees from plain function calls.
//!
//! Builder functions (`div`, `h1`, ...) record a flat log of elements and
//! nesting markers while a root builder runs; the driver then reconstructs a
//! nested tree from that log and hands it to a [`Renderer`].
//!
//! ```
//! use stackdom::prelude::*;
//!
//! let html = Root::new()
//!     .render_to(&mut HtmlRenderer::new(), || {
//!         let (count, _set_count) = declare_state(3);
//!         div(Some(props! { "class" => "counter" }), || {
//!             h1(None, "Clicks");
//!             span(None, *count);
//!         });
//!     })
//!     .unwrap();
//!
//! assert_eq!(html, "<div class=\"counter\"><h1>Clicks</h1><span>3</span></div>");
//! ```

// Lets macro-generated code refer to `::stackdom` from inside this crate.
extern crate self as stackdom;

pub mod builder;
pub mod children;
pub mod config;
pub mod driver;
pub mod error;
pub mod reconstruct;
pub mod render;
pub mod scope;
pub mod stack;
pub mod state;
pub mod tag;
pub mod value;

pub use builder::{make_builder, BuildContext, Builder};
pub use children::{IntoChildren, LeafChildren, NestedChildren, NoChildren};
pub use config::RootConfig;
pub use driver::{render, render_to, CyclePhase, Root};
pub use error::{BuildError, Result, StructuralError};
pub use reconstruct::{reconstruct, validate, Fragment, Node};
pub use render::{HtmlRenderer, Renderer};
pub use stack::{Boundary, ElementDescriptor, RecordingBuffer, StackItem, StateMarker};
pub use state::{declare_state, Setter};
pub use tag::{a, button, div, h1, li, ol, p, span, ul, Tag};
pub use value::{Callback, PropValue, Props};

pub mod prelude {
    pub use crate::props;
    pub use crate::render::{HtmlRenderer, Renderer};
    pub use crate::state::declare_state;
    pub use crate::tag::{a, button, div, h1, li, ol, p, span, ul, Tag};
    pub use crate::value::{Callback, PropValue, Props};
    pub use crate::{render, render_to, BuildContext, Fragment, Node, Root, RootConfig};
}
