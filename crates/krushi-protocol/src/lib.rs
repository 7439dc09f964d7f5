//! # krushi-protocol
//!
//! Wire format of the MCP action endpoint: the request envelope with its
//! legacy aliases, success and error bodies, and the server info snapshot.

pub mod envelope;
pub mod info;
pub mod path;

pub use envelope::{ActionError, ActionRequest, ActionResult};
pub use info::{ActionList, ServerInfo};
pub use path::{check_endpoint_path, HEALTH_PATH, READY_PATH};

/// Default path of the MCP endpoint.
pub const MCP_PATH: &str = "/api/mcp";

/// Name reported in `ServerInfo`.
pub const SERVER_NAME: &str = "krushimitra-mcp";

/// Fixed error messages returned by the endpoint.
pub mod messages {
    /// Neither `action` nor `method` was supplied.
    pub const ACTION_REQUIRED: &str = "Action or method is required";
    /// Prefix for unregistered action names.
    pub const UNKNOWN_ACTION_PREFIX: &str = "Unknown action: ";
    /// A handler failed.
    pub const INTERNAL_ERROR: &str = "Internal server error";
    /// The POST body was not a JSON object.
    pub const INVALID_BODY: &str = "Invalid JSON body";
    /// Bearer token missing or wrong.
    pub const UNAUTHORIZED: &str = "unauthorized";

    /// Builds the message for an unregistered action.
    pub fn unknown_action(name: &str) -> String {
        format!("{UNKNOWN_ACTION_PREFIX}{name}")
    }
}
