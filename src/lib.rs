//! cg2dot
//!
//! Converts Xdebug cachegrind call traces (format version 0.9.6) into
//! aggregated call trees, ready to render as Graphviz DOT graphs.
//!
//! The pipeline, one module per stage:
//!
//! 1. [`parser`] validates a trace with two automata and produces flat
//!    entries with interned names
//! 2. [`tree`] rebuilds the call tree from the entries in one backward pass
//! 3. [`aggregator`] merges trees, collapses repeated call paths and prunes
//!    insignificant ones
//! 4. [`graph`] renders the result; [`output`] writes it
//!
//! ```
//! use cg2dot::parser::{parse_trace, Symbols};
//! use cg2dot::tree::build_tree;
//!
//! let text = "version: 0.9.6\ncmd: index.php\npart: 1\n\nevents: Time\n\n\
//!             fl=index.php\nfn={main}\n\nsummary: 5\n\n0 5\n";
//! let mut symbols = Symbols::new();
//! let trace = parse_trace(text, &mut symbols).unwrap();
//! let tree = build_tree(&trace.entries).unwrap();
//! assert_eq!(tree.total_time(), 5);
//! ```

pub mod aggregator;
pub mod commands;
pub mod graph;
pub mod output;
pub mod parser;
pub mod tree;
pub mod utils;
