//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod convert;
pub mod models;
pub mod utils;

// Re-export main command functions
pub use convert::{build_call_tree, execute_convert, validate_args, Conversion};
pub use models::ConvertArgs;
pub use utils::{display_version, validate_trace_files};
