//! # krushi-types
//!
//! Domain types for the KrushiMitra action server.
//! Pure data types with no dependencies beyond serde.

pub mod action;
pub mod error;

pub use action::{ActionKind, ActionName};
pub use error::{DiagnosticError, ErrorKind, KrushiError};
