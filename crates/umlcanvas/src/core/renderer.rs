//! Renderer trait for diagram output
//!
//! A renderer turns the contents of a [`Database`] into one output format
//! (ASCII text, SVG markup, PNG bytes).

use anyhow::Result;

use super::Database;

/// Core trait for diagram renderers
pub trait Renderer<D: Database>: Send + Sync {
    /// The output type of this renderer
    type Output;

    /// Render the database into the output format
    fn render(&self, database: &D) -> Result<Self::Output>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;

    /// Get the supported output format
    fn format(&self) -> &'static str;
}
