//! Flat records produced by the trace reader.

use super::symbols::{FileId, FunctionId};

/// One function block of the trace (`fl=` / `fn=` / self cost / calls)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    pub function: FunctionId,
    pub file: FileId,
    pub self_time: u64,

    /// Outgoing calls in the order they appear in the trace
    pub calls: Vec<Call>,

    /// Declared `summary:` value; only the top-level entry carries one
    pub summary: Option<u64>,
}

impl Entry {
    pub fn new(file: FileId) -> Self {
        Self {
            file,
            ..Default::default()
        }
    }
}

/// One `cfn=` / `calls=` / cost block inside an [`Entry`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Call {
    pub callee: FunctionId,

    /// Line of the call site in the caller's file
    pub position: u64,

    pub inclusive_time: u64,

    /// Value of the `calls=` line
    pub count: u64,
}

impl Call {
    pub fn new(callee: FunctionId) -> Self {
        Self {
            callee,
            ..Default::default()
        }
    }
}

/// Prologue of a trace file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceHeader {
    /// Command line that produced the trace (`cmd:` line)
    pub command: String,
}

/// Sanity figures accumulated while reading.
///
/// These are diagnostics; nothing in tree building depends on them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceTotals {
    /// Value of the `summary:` line, if present
    pub summary: Option<u64>,

    /// Sum of every function's self time
    pub total_self: u64,

    /// `{main}`'s self time plus the inclusive time of its outgoing calls
    pub main_inclusive: u64,
}

/// Everything read from one trace file
#[derive(Debug, Clone, Default)]
pub struct ParsedTrace {
    pub header: TraceHeader,
    pub entries: Vec<Entry>,
    pub totals: TraceTotals,
}

impl ParsedTrace {
    pub fn call_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.calls.len()).sum()
    }
}
