//! # krushi-mcp
//!
//! Action dispatch (APPLICATION layer).
//!
//! `ActionRegistry` maps action names to async handlers and offers one
//! uniform call contract for flows and tools. The registry is immutable
//! once built, so the listed names are exactly the dispatchable ones.

pub mod error;
pub mod handler;
pub mod metrics;
pub mod registry;

pub use error::{DispatchError, HandlerError, RegistryError};
pub use handler::{handler_fn, Action, ActionHandler, ActionOutput, FnHandler, Typed};
pub use metrics::{DispatchMetrics, MetricsSnapshot};
pub use registry::{ActionRegistry, RegistryBuilder};
