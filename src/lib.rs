//! # spark-cells
//!
//! Marker-driven cell lifecycle manager.
//!
//! A host tree carries marker elements such as `<div data-cell="greeter">`.
//! Each pass of the [`CellBuilder`] finds those elements, binds one cell per
//! element (reusing the cell from the previous pass when the element is still
//! there) and destroys cells whose element disappeared.
//!
//! ## Architecture
//!
//! ```text
//! CellRegistry (name → constructor) ─┐
//!                                    ├→ CellBuilder::reconcile(tree) → live cells
//! CellTree (marked elements) ────────┘
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use spark_cells::{CellBuilder, CellRegistry, Document, DEFAULT_MARKER};
//!
//! let mut registry = CellRegistry::new();
//! registry.register(|element: &NodeId| Ok(Greeter::new(*element)), "greeter");
//!
//! let mut doc = Document::new();
//! let root = doc.root();
//! doc.append_marked(root, "div", DEFAULT_MARKER, "greeter");
//!
//! let mut builder = CellBuilder::new(registry);
//! builder.initialize(&doc)?;
//!
//! // later, after the tree changed
//! builder.reconcile(&doc)?;
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Core types (Hooks, CellId, marker constant)
//! - [`cell`] - The `Cell` trait and live cell instances
//! - [`engine`] - Registry and builder
//! - [`tree`] - Tree query trait and the in-memory `Document`

pub mod cell;
pub mod config;
pub mod engine;
pub mod error;
pub mod tree;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use cell::{Cell, CellInstance};
pub use config::BuilderOptions;
pub use engine::{CellBuilder, CellRegistry, Constructor, ReconcileReport};
pub use error::ReconcileError;
pub use tree::{CellTree, Document, Element, Marked, NodeId, Subtree};
