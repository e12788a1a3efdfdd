//! Builder configuration.

use crate::types::DEFAULT_MARKER;

/// Options for a [`CellBuilder`](crate::CellBuilder).
///
/// Construct with struct literal syntax and `..Default::default()`:
/// ```ignore
/// let options = BuilderOptions {
///     marker: "data-widget".into(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderOptions {
    /// Attribute that marks a cell host. Defaults to `data-cell`.
    pub marker: String,
}

impl BuilderOptions {
    pub fn with_marker(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_owned(),
        }
    }
}
