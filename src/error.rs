//! Errors raised by a reconciliation pass.
//!
//! Unresolved type names are not errors: they are reported as warnings and
//! listed in [`ReconcileReport`](crate::ReconcileReport). Everything here
//! aborts the remainder of the pass that raised it.

use thiserror::Error;

use crate::types::CellId;

#[derive(Debug, Error)]
pub enum ReconcileError {
    #[error("failed to construct cell '{type_name}' for element {element}")]
    Construct {
        type_name: String,
        element: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("cell {cell} ('{type_name}') failed to initialize")]
    Initialize {
        cell: CellId,
        type_name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("cell {cell} ('{type_name}') failed to reload")]
    Reload {
        cell: CellId,
        type_name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("cell {cell} ('{type_name}') failed to destroy")]
    Destroy {
        cell: CellId,
        type_name: String,
        #[source]
        source: anyhow::Error,
    },
}

impl ReconcileError {
    /// The cell whose hook failed, if the failure happened after construction.
    pub fn cell(&self) -> Option<CellId> {
        match self {
            Self::Construct { .. } => None,
            Self::Initialize { cell, .. }
            | Self::Reload { cell, .. }
            | Self::Destroy { cell, .. } => Some(*cell),
        }
    }

    /// Registered type name of the cell involved.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Construct { type_name, .. }
            | Self::Initialize { type_name, .. }
            | Self::Reload { type_name, .. }
            | Self::Destroy { type_name, .. } => type_name,
        }
    }
}
