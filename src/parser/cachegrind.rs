//! Reader for Xdebug's cachegrind-compatible trace files.
//!
//! Reading happens in two passes over the text: the header automaton checks
//! the prologue, then the body automaton walks the whole file again and
//! turns every function block into an [`Entry`].
//!
//! ```text
//! version: 0.9.6
//! cmd: /srv/index.php
//! part: 1
//!
//! events: Time
//!
//! fl=php:internal
//! fn=php::strlen
//! 12 3
//!
//! fl=/srv/index.php
//! fn={main}
//!
//! summary: 100
//!
//! 0 97
//! cfn=php::strlen
//! calls=1 0 0
//! 12 3
//! ```

use super::fsa::{classify_body_line, classify_header_line, BodyState, HeaderState, Step, Token};
use super::schema::{Call, Entry, ParsedTrace, TraceHeader, TraceTotals};
use super::symbols::Symbols;
use crate::utils::config::{
    CALLED_FUNCTION_PREFIX, CALLS_PREFIX, COMMAND_PREFIX, FILE_PREFIX, FUNCTION_PREFIX,
    MAIN_FUNCTION, SUMMARY_PREFIX,
};
use crate::utils::error::ParseError;
use log::debug;
use std::path::Path;

/// Read and parse a trace file from disk
///
/// **Public** - main entry point for file input
pub fn parse_file(path: impl AsRef<Path>, symbols: &mut Symbols) -> Result<ParsedTrace, ParseError> {
    let path = path.as_ref();
    debug!("Reading trace file: {}", path.display());
    let text = std::fs::read_to_string(path)?;
    parse_trace(&text, symbols)
}

/// Parse trace text, interning names into `symbols`
///
/// **Public** - main entry point for parsing
///
/// # Errors
/// * `ParseError::Structural` - a line is illegal where it appears, or the
///   input ends in the middle of a block
/// * `ParseError::InvalidNumber` - a cost, `calls=` or `summary:` value is
///   not a non-negative integer
///
/// On error, names interned so far stay in `symbols`; callers that skip the
/// file roll them back with [`Symbols::rollback`].
pub fn parse_trace(text: &str, symbols: &mut Symbols) -> Result<ParsedTrace, ParseError> {
    let header = parse_header(text)?;

    let mut reader = BodyReader::new(symbols);
    let mut state = BodyState::Preamble;
    let mut line_count = 0;

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        line_count = line_no;

        let Some(token) = classify_body_line(line, state) else {
            continue;
        };
        match state.transition(token) {
            Some(Step::Next(next)) => {
                state = next;
                reader.apply(state, line_no, line)?;
            }
            // Only end of input is accepted
            Some(Step::Accept) | None => {
                return Err(structural(line_no, line, token, state.expected()));
            }
        }
    }

    if state.transition(Token::Eof) != Some(Step::Accept) {
        return Err(structural(line_count, "", Token::Eof, state.expected()));
    }

    let (entries, totals) = reader.finish();
    debug!(
        "Parsed {} entries ({} files, {} functions known)",
        entries.len(),
        symbols.files.len(),
        symbols.functions.len()
    );

    Ok(ParsedTrace {
        header,
        entries,
        totals,
    })
}

/// Validate the prologue and return what it declares
///
/// **Public** - also used on its own to sniff files
pub fn parse_header(text: &str) -> Result<TraceHeader, ParseError> {
    let mut state = HeaderState::Start;
    let mut header = TraceHeader::default();
    let mut line_count = 0;

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        line_count = line_no;

        let Some(token) = classify_header_line(line) else {
            continue;
        };
        match state.transition(token) {
            Some(Step::Next(next)) => {
                if next == HeaderState::Command {
                    header.command = line[COMMAND_PREFIX.len()..].to_string();
                }
                state = next;
            }
            Some(Step::Accept) => return Ok(header),
            None => return Err(structural(line_no, line, token, state.expected())),
        }
    }

    match state.transition(Token::Eof) {
        Some(Step::Accept) => Ok(header),
        _ => Err(structural(line_count, "", Token::Eof, state.expected())),
    }
}

fn structural(line: usize, raw: &str, found: Token, expected: &'static str) -> ParseError {
    ParseError::Structural {
        line,
        raw: raw.to_string(),
        found,
        expected,
    }
}

/// Parser context threaded through the body automaton's actions
struct BodyReader<'s> {
    symbols: &'s mut Symbols,
    entries: Vec<Entry>,

    /// Entry under construction, opened by the last `fl=` line
    current: Option<Entry>,

    /// Call under construction, opened by the last `cfn=` line
    pending_call: Option<Call>,

    /// Whether the current entry is the top-level `{main}` function
    in_main: bool,

    totals: TraceTotals,
}

impl<'s> BodyReader<'s> {
    fn new(symbols: &'s mut Symbols) -> Self {
        Self {
            symbols,
            entries: Vec::new(),
            current: None,
            pending_call: None,
            in_main: false,
            totals: TraceTotals::default(),
        }
    }

    fn entry(&mut self) -> &mut Entry {
        self.current.get_or_insert_with(Entry::default)
    }

    /// Run the action attached to entering `state` on `line`
    fn apply(&mut self, state: BodyState, line_no: usize, line: &str) -> Result<(), ParseError> {
        match state {
            BodyState::Preamble => {}

            BodyState::File => {
                let file = self.symbols.files.intern(&line[FILE_PREFIX.len()..]);
                if let Some(finished) = self.current.replace(Entry::new(file)) {
                    self.entries.push(finished);
                }
                self.in_main = false;
            }

            BodyState::Function => {
                let name = &line[FUNCTION_PREFIX.len()..];
                let function = self.symbols.functions.intern(name);
                self.in_main = name == MAIN_FUNCTION;
                self.entry().function = function;
            }

            BodyState::SelfCost => {
                let (_, time) = parse_cost(line_no, line)?;
                self.entry().self_time = time;
                self.totals.total_self = self.totals.total_self.saturating_add(time);
                if self.in_main {
                    self.totals.main_inclusive = self.totals.main_inclusive.saturating_add(time);
                }
            }

            BodyState::CalledFunction => {
                let callee = self
                    .symbols
                    .functions
                    .intern(&line[CALLED_FUNCTION_PREFIX.len()..]);
                self.pending_call = Some(Call::new(callee));
            }

            BodyState::Calls => {
                let count = line[CALLS_PREFIX.len()..]
                    .split_whitespace()
                    .next()
                    .and_then(|value| value.parse().ok())
                    .ok_or_else(|| invalid_number(line_no, line))?;
                if let Some(call) = self.pending_call.as_mut() {
                    call.count = count;
                }
            }

            BodyState::CallCost => {
                let (position, time) = parse_cost(line_no, line)?;
                let mut call = self.pending_call.take().unwrap_or_default();
                call.position = position;
                call.inclusive_time = time;
                self.entry().calls.push(call);
                if self.in_main {
                    self.totals.main_inclusive = self.totals.main_inclusive.saturating_add(time);
                }
            }

            BodyState::Summary => {
                let summary = line[SUMMARY_PREFIX.len()..]
                    .trim()
                    .parse()
                    .map_err(|_| invalid_number(line_no, line))?;
                self.entry().summary = Some(summary);
                self.totals.summary = Some(summary);
            }
        }
        Ok(())
    }

    fn finish(mut self) -> (Vec<Entry>, TraceTotals) {
        if let Some(last) = self.current.take() {
            self.entries.push(last);
        }
        (self.entries, self.totals)
    }
}

/// Parse a `position time` cost line
fn parse_cost(line_no: usize, line: &str) -> Result<(u64, u64), ParseError> {
    let mut fields = line.split_whitespace().map(str::parse::<u64>);
    match (fields.next(), fields.next(), fields.next()) {
        (Some(Ok(position)), Some(Ok(time)), None) => Ok((position, time)),
        _ => Err(invalid_number(line_no, line)),
    }
}

fn invalid_number(line: usize, raw: &str) -> ParseError {
    ParseError::InvalidNumber {
        line,
        raw: raw.to_string(),
    }
}
