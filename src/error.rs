use thiserror::Error;

use crate::tag::Tag;

/// A recording buffer that does not describe a tree.
///
/// Positions are 0-based indices into the buffer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructuralError {
    #[error("<{tag}> opened at position {position} is never closed")]
    UnclosedParent { tag: Tag, position: usize },
    #[error("end of parent at position {position} has no matching begin")]
    UnexpectedEnd { position: usize },
    #[error("begin of parent at position {position} is not followed by a parent element")]
    OrphanBegin { position: usize },
    #[error("parent <{tag}> at position {position} is not preceded by a begin marker")]
    MissingBegin { tag: Tag, position: usize },
    #[error("nesting exceeds the limit of {limit} levels")]
    DepthExceeded { limit: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("malformed build: {0}")]
    Structural(#[from] StructuralError),
    #[error("build cycle started while the same root is already recording")]
    Reentrant,
}

pub type Result<T> = std::result::Result<T, BuildError>;
