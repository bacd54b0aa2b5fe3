//! Process exit codes used by the `dotlink` binary.
//!
//! - `0`: success
//! - `1`: usage error, or a fatal error while running a command
//! - `2`: a command precondition failed (path outside target, path already
//!   exists, ...)

/// The command completed.
pub const SUCCESS: u8 = 0;

/// Malformed arguments, or a fatal runtime error.
pub const USAGE: u8 = 1;

/// A precondition of the command was not met.
pub const PRECONDITION: u8 = 2;
