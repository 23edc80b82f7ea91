//! Shared test constants

/// HS256 secret used by test servers and minted tokens
pub const TEST_JWT_SECRET: &str = "test-secret";

/// The default user id embedded in minted tokens
pub const TEST_USER_ID: &str = "user-123";

/// Timeout for individual HTTP requests
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// How long to wait for a spawned server to become ready
pub const SERVER_READY_TIMEOUT_MS: u64 = 5_000;

/// Polling interval while waiting for server readiness
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 20;
