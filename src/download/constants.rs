//! Constants for the download module (timeouts, buffering).

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes).
///
/// Applies to each read from the connection, not to the whole request, so a
/// large body that keeps arriving is never cut off.
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Capacity of the buffered writer used when streaming a body to disk.
pub const WRITE_BUFFER_BYTES: usize = 8 * 1024;
