//! Routes served next to the action endpoint and the rules its path must meet.

/// Liveness check route.
pub const HEALTH_PATH: &str = "/health";

/// Readiness check route.
pub const READY_PATH: &str = "/health/ready";

/// Checks that `path` can mount the action endpoint.
///
/// The path must be absolute, must not shadow a health route, and may only
/// use unreserved URL characters so the router treats it as a literal.
///
/// # Errors
///
/// Returns a message naming the first problem found.
pub fn check_endpoint_path(path: &str) -> Result<(), String> {
    if !path.starts_with('/') {
        return Err(format!("endpoint path must start with '/', got {path:?}"));
    }
    if path == HEALTH_PATH || path == READY_PATH {
        return Err(format!("endpoint path {path:?} is reserved for health checks"));
    }
    if let Some(c) = path
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(*c, '/' | '-' | '_' | '.' | '~')))
    {
        return Err(format!("endpoint path {path:?} contains {c:?}"));
    }
    Ok(())
}
