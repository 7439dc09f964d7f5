//! HTTP adapter for the KrushiMitra action registry.
//!
//! One path (default `/api/mcp`) answers `GET` with the server info and
//! `POST` with a dispatch; `/health` and `/health/ready` are health checks.

pub mod auth;
mod error;
pub mod router;
pub mod server;

pub use error::HttpTransportError;
pub use router::{build_router, build_router_at, AppState};
pub use server::HttpServer;
