// Build-time identity reported by `/`, `/version` and the health check

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Human-readable service name for the index endpoint.
pub const SERVICE: &str = "System Resource Monitor API";

/// Service name reported by `/api/health`.
pub const HEALTH_SERVICE: &str = "System Monitor API";
