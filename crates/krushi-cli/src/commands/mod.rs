//! CLI command definitions.

pub mod actions;
pub mod call;
pub mod info;
pub mod serve;
