//! Stable exit codes for `askwiz` commands.

/// Command succeeded; for `confirm`, the user answered yes.
pub const OK: i32 = 0;
/// Invalid arguments, config or history, or any other error.
pub const INVALID: i32 = 1;
/// `askwiz confirm` was answered no.
pub const DECLINED: i32 = 2;
