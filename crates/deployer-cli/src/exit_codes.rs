//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

/// General error - an external command failed
pub const ERROR: i32 = 1;

/// Cluster error - the target cluster (or k3d itself) is missing
pub const CLUSTER_NOT_FOUND: i32 = 3;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 5;

/// Usage error - invalid arguments or options (following sysexits.h convention)
pub const USAGE_ERROR: i32 = 64;

/// Unavailable - unsupported platform or distribution (EX_UNAVAILABLE)
pub const UNAVAILABLE: i32 = 69;

/// Permission error - root privileges required (EX_NOPERM)
pub const NO_PERMISSION: i32 = 77;

/// Configuration error - invalid config file (EX_CONFIG)
pub const CONFIG_ERROR: i32 = 78;
