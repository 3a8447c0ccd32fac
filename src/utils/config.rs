//! Configuration and constants for the CLI.

/// Current JSON report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Default pruning threshold, in percent of total inclusive time
pub const DEFAULT_THRESHOLD: f64 = 1.0;

// Header lines of the only supported trace format version
pub const VERSION_LINE: &str = "version: 0.9.6";
pub const COMMAND_PREFIX: &str = "cmd: ";
pub const PART_LINE: &str = "part: 1";
pub const EVENTS_LINE: &str = "events: Time";

// Body line markers
pub const FILE_PREFIX: &str = "fl=";
pub const FUNCTION_PREFIX: &str = "fn=";
pub const CALLED_FUNCTION_PREFIX: &str = "cfn=";
pub const CALLS_PREFIX: &str = "calls=";
pub const SUMMARY_PREFIX: &str = "summary: ";

/// Function name Xdebug gives the script's top-level code
pub const MAIN_FUNCTION: &str = "{main}";

/// Prefix Xdebug puts on PHP internal functions
pub const INTERNAL_FUNCTION_PREFIX: &str = "php::";

/// Display name of the synthetic tree root
pub const ROOT_LABEL: &str = "{root}";
