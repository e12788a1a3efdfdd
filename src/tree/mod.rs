//! Tree Query - How the builder discovers marker elements.
//!
//! The builder never walks a tree itself. It asks a [`CellTree`] for every
//! element carrying the marker attribute, in document order, and works with the
//! returned handles only.
//!
//! [`Document`] is an in-memory tree that implements [`CellTree`]. Hosts with
//! their own tree (a browser DOM, a widget tree) implement the trait directly.

mod document;

pub use document::{Document, NodeId, Subtree};

use std::fmt;
use std::hash::Hash;

// =============================================================================
// Element Handles
// =============================================================================

/// Opaque, stable handle to one element of a tree.
///
/// Two handles compare equal if and only if they refer to the same underlying
/// element. Attribute equality is irrelevant.
pub trait Element: Clone + Eq + Hash + fmt::Debug + 'static {}

impl<T> Element for T where T: Clone + Eq + Hash + fmt::Debug + 'static {}

/// An element carrying the marker attribute, with the type name it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marked<E> {
    pub element: E,
    pub type_name: String,
}

impl<E> Marked<E> {
    pub fn new(element: E, type_name: impl Into<String>) -> Self {
        Self {
            element,
            type_name: type_name.into(),
        }
    }
}

// =============================================================================
// CellTree
// =============================================================================

/// Read-only query capability over a tree of elements.
pub trait CellTree {
    type Element: Element;

    /// Every element carrying the `marker` attribute, in document order, paired
    /// with the attribute's value.
    fn query_marked(&self, marker: &str) -> Vec<Marked<Self::Element>>;
}

impl<T: CellTree + ?Sized> CellTree for &T {
    type Element = T::Element;

    fn query_marked(&self, marker: &str) -> Vec<Marked<Self::Element>> {
        (**self).query_marked(marker)
    }
}
