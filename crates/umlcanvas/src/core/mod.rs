//! Core abstractions shared by the importer, renderers and bindings
//!
//! Errors, logging, the database and renderer traits, drawing surfaces and the basic
//! geometry and theme types.

mod canvas;
mod database;
mod error;
pub mod logging;
mod renderer;
mod surface;
mod types;

pub use canvas::*;
pub use database::*;
pub use error::*;
pub use logging::*;
pub use renderer::*;
pub use surface::*;
pub use types::*;
