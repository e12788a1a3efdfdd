//! Cell Engine - Registry and reconciliation.
//!
//! The engine owns the two stateful pieces:
//! - Registry: type name to constructor, first registration wins
//! - Builder: the live set of cells and the reconcile pass over it
//!
//! # Lifecycle
//!
//! ```text
//! register(..) → initialize(tree) → reconcile(tree) → ... → teardown()
//! ```
//!
//! Nothing here schedules passes. The host calls `reconcile` whenever its tree
//! may have changed.

mod builder;
mod registry;

pub use builder::*;
pub use registry::*;
