//! Trace parsing and the flat record schema.
//!
//! This module handles:
//! - Validating the header and body of cachegrind traces
//! - Interning file and function names
//! - Producing the flat entry list the tree builder consumes

pub mod cachegrind;
pub mod fsa;
pub mod schema;
pub mod symbols;

// Re-export main types
pub use cachegrind::{parse_file, parse_header, parse_trace};
pub use schema::{Call, Entry, ParsedTrace, TraceHeader, TraceTotals};
pub use symbols::{Checkpoint, FileId, FunctionId, Symbols};
