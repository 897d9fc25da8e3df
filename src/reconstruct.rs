//! Tree reconstruction.
//!
//! Turns the flat recording buffer of a finished build back into nested
//! [`Node`]s. The walk is a single forward pass with a shared cursor: a parent
//! element recurses to collect its descendants and the recursion returns at
//! the matching `End` marker.

use log::warn;

use crate::config::RootConfig;
use crate::error::StructuralError;
use crate::render::Renderer;
use crate::stack::{Boundary, StackItem};
use crate::tag::Tag;
use crate::value::{PropValue, Props};

/// A reconstructed element.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub tag: Tag,
    /// Recorded properties plus the synthetic positional key.
    pub props: Props,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(tag: Tag, props: Props, children: Vec<Node>) -> Self {
        Self {
            tag,
            props,
            children,
        }
    }

    pub fn prop(&self, name: &str) -> Option<&PropValue> {
        self.props.get(name)
    }

    /// Literal content of a leaf.
    pub fn text(&self) -> Option<&PropValue> {
        self.props.children()
    }

    /// Levels in the subtree rooted here, counting this node.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(Node::depth).max().unwrap_or(0)
    }

    /// Nodes in the subtree rooted here, counting this node.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }

    /// Hand this subtree to `renderer`, children first.
    pub fn render<R: Renderer>(self, renderer: &mut R) -> R::Output {
        let children = self
            .children
            .into_iter()
            .map(|child| child.render(renderer))
            .collect();
        renderer.create_element(self.tag, self.props, children)
    }
}

/// The top-level node sequence of one build, wrapped as a fragment.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Fragment {
    pub nodes: Vec<Node>,
}

impl Fragment {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    /// Deepest node level; 0 for an empty fragment.
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(Node::depth).max().unwrap_or(0)
    }

    pub fn count(&self) -> usize {
        self.nodes.iter().map(Node::count).sum()
    }

    pub fn render<R: Renderer>(self, renderer: &mut R) -> R::Output {
        let children = self
            .nodes
            .into_iter()
            .map(|node| node.render(renderer))
            .collect();
        renderer.fragment(children)
    }
}

/// Check that `items` is a well-formed bracket sequence whose parents nest
/// at most `max_depth` levels deep.
pub fn validate(items: &[StackItem], max_depth: usize) -> Result<(), StructuralError> {
    let mut open: Vec<(Tag, usize)> = Vec::new();

    for (position, item) in items.iter().enumerate() {
        match item {
            StackItem::Boundary(Boundary::Begin) => match items.get(position + 1) {
                Some(StackItem::Element(next)) if next.opens_parent => {
                    open.push((next.tag, position));
                    if open.len() > max_depth {
                        return Err(StructuralError::DepthExceeded { limit: max_depth });
                    }
                }
                _ => return Err(StructuralError::OrphanBegin { position }),
            },
            StackItem::Boundary(Boundary::End) => {
                if open.pop().is_none() {
                    return Err(StructuralError::UnexpectedEnd { position });
                }
            }
            StackItem::Element(descriptor) if descriptor.opens_parent => {
                let preceded_by_begin = position
                    .checked_sub(1)
                    .is_some_and(|prev| items[prev].is_boundary(Boundary::Begin));
                if !preceded_by_begin {
                    return Err(StructuralError::MissingBegin {
                        tag: descriptor.tag,
                        position,
                    });
                }
            }
            StackItem::Element(_) | StackItem::State(_) => {}
        }
    }

    match open.pop() {
        Some((tag, position)) => Err(StructuralError::UnclosedParent { tag, position }),
        None => Ok(()),
    }
}

/// Rebuild the tree recorded in `items`.
///
/// Runs [`validate`] first when `config.validate` is set. Without validation
/// a missing `End` nests everything after it into the open parent, and an
/// unmatched `End` ends the top level early.
pub fn reconstruct(items: Vec<StackItem>, config: &RootConfig) -> Result<Fragment, StructuralError> {
    if config.validate {
        validate(&items, config.max_depth)?;
    }

    let total = items.len();
    let mut reconstructor = Reconstructor {
        items: items.into_iter(),
        cursor: 0,
        config,
    };
    let nodes = reconstructor.build_nodes(0)?;

    if reconstructor.cursor < total {
        warn!(
            "{} recorded items after an unmatched end were dropped",
            total - reconstructor.cursor
        );
    }

    Ok(Fragment::new(nodes))
}

struct Reconstructor<'a> {
    items: std::vec::IntoIter<StackItem>,
    /// Number of items consumed so far.
    cursor: usize,
    config: &'a RootConfig,
}

impl Reconstructor<'_> {
    fn build_nodes(&mut self, depth: usize) -> Result<Vec<Node>, StructuralError> {
        let mut nodes = Vec::new();

        while let Some(item) = self.items.next() {
            self.cursor += 1;
            match item {
                StackItem::Boundary(Boundary::Begin) => {}
                StackItem::Boundary(Boundary::End) => break,
                // Slots carry no structure yet.
                StackItem::State(_) => {}
                StackItem::Element(descriptor) => {
                    let key = self.cursor;
                    let children = if descriptor.opens_parent {
                        if depth >= self.config.max_depth {
                            return Err(StructuralError::DepthExceeded {
                                limit: self.config.max_depth,
                            });
                        }
                        self.build_nodes(depth + 1)?
                    } else {
                        Vec::new()
                    };

                    let mut props = descriptor.props;
                    if !props.contains(&self.config.key_attribute) {
                        props.insert(self.config.key_attribute.as_str(), key);
                    }
                    nodes.push(Node::new(descriptor.tag, props, children));
                }
            }
        }

        Ok(nodes)
    }
}
