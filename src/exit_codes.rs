//! Exit code constants for the pydelta CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, config, I/O)
//! - 2: Source file rejected (missing, not a file, wrong extension)
//! - 3: Source file violates the coding standard

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable config, or an I/O failure.
pub const USER_ERROR: i32 = 1;

/// The source path does not point at an analyzable file.
pub const INVALID_SOURCE: i32 = 2;

/// The source parsed but breaks one of the coding-standard rules.
pub const STANDARD_VIOLATION: i32 = 3;
