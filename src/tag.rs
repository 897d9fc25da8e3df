//! The fixed set of intrinsic elements.
//!
//! `#[derive(IntrinsicTags)]` also emits one builder function per variant
//! (`h1`, `div`, `span`, ...), re-exported from the crate root.

use stackdom_macros::IntrinsicTags;

/// Intrinsic element identifiers understood by renderers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, IntrinsicTags)]
pub enum Tag {
    H1,
    Div,
    Span,
    #[tag(name = "a")]
    Anchor,
    Button,
    Ol,
    Li,
    P,
    Ul,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_lowercase_variants() {
        assert_eq!(Tag::H1.as_str(), "h1");
        assert_eq!(Tag::Button.as_str(), "button");
    }

    #[test]
    fn test_name_override() {
        assert_eq!(Tag::Anchor.as_str(), "a");
        assert_eq!(Tag::Anchor.to_string(), "a");
        assert_eq!(Tag::from_name("a"), Some(Tag::Anchor));
        assert_eq!(Tag::from_name("anchor"), None);
    }

    #[test]
    fn test_from_name_round_trips_every_tag() {
        for tag in Tag::ALL {
            assert_eq!(Tag::from_name(tag.as_str()), Some(*tag));
        }
        assert_eq!(Tag::from_name("marquee"), None);
    }
}
