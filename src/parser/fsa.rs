//! Line classification and the two automata that validate a trace.
//!
//! The header automaton checks the fixed prologue, the body automaton checks
//! the order of function blocks. Both transition functions are total: every
//! (state, token) pair maps to a next state, acceptance, or `None` for an
//! illegal token.

use crate::utils::config::{
    CALLED_FUNCTION_PREFIX, CALLS_PREFIX, COMMAND_PREFIX, EVENTS_LINE, FILE_PREFIX,
    FUNCTION_PREFIX, PART_LINE, SUMMARY_PREFIX, VERSION_LINE,
};
use std::fmt;

/// Lexical class of one trace line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// `version: 0.9.6`
    Version,
    /// `cmd: ...`
    Command,
    /// `part: 1`
    Part,
    /// `events: Time`
    Events,
    /// Any other line of the preamble, seen by the body automaton
    HeaderLine,
    /// `fl=...`
    File,
    /// `fn=...`
    Function,
    /// `position time`
    Cost,
    /// `cfn=...`
    CalledFunction,
    /// `calls=...`
    Calls,
    /// `summary: ...`
    Summary,
    Eof,
    Unknown,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Token::Version => "version line",
            Token::Command => "cmd line",
            Token::Part => "part line",
            Token::Events => "events line",
            Token::HeaderLine => "header line",
            Token::File => "fl= marker",
            Token::Function => "fn= marker",
            Token::Cost => "cost line",
            Token::CalledFunction => "cfn= marker",
            Token::Calls => "calls= marker",
            Token::Summary => "summary line",
            Token::Eof => "end of input",
            Token::Unknown => "unrecognized line",
        };
        f.write_str(name)
    }
}

/// Outcome of a legal transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<S> {
    Next(S),
    Accept,
}

/// Classify a line for the header automaton. Empty lines are skipped (`None`).
pub fn classify_header_line(line: &str) -> Option<Token> {
    if line.is_empty() {
        return None;
    }
    let token = if line == VERSION_LINE {
        Token::Version
    } else if line.starts_with(COMMAND_PREFIX) {
        Token::Command
    } else if line == PART_LINE {
        Token::Part
    } else if line == EVENTS_LINE {
        Token::Events
    } else if line.starts_with(FILE_PREFIX) {
        Token::File
    } else {
        Token::Unknown
    };
    Some(token)
}

/// Classify a line for the body automaton. Empty lines are skipped (`None`).
///
/// Unmarked lines only count as header lines while the automaton is still
/// in the preamble.
pub fn classify_body_line(line: &str, state: BodyState) -> Option<Token> {
    if line.is_empty() {
        return None;
    }
    let token = if line.starts_with(|c: char| c.is_ascii_digit()) {
        Token::Cost
    } else if line.starts_with(FILE_PREFIX) {
        Token::File
    } else if line.starts_with(FUNCTION_PREFIX) {
        Token::Function
    } else if line.starts_with(CALLED_FUNCTION_PREFIX) {
        Token::CalledFunction
    } else if line.starts_with(CALLS_PREFIX) {
        Token::Calls
    } else if line.starts_with(SUMMARY_PREFIX) {
        Token::Summary
    } else if state == BodyState::Preamble {
        Token::HeaderLine
    } else {
        Token::Unknown
    };
    Some(token)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderState {
    Start,
    Version,
    Command,
    Part,
    Events,
}

impl HeaderState {
    pub fn transition(self, token: Token) -> Option<Step<HeaderState>> {
        use HeaderState::*;
        match (self, token) {
            (Start, Token::Version) => Some(Step::Next(Version)),
            (Version, Token::Command) => Some(Step::Next(Command)),
            (Command, Token::Part) => Some(Step::Next(Part)),
            (Part, Token::Events) => Some(Step::Next(Events)),
            (Events, Token::File | Token::Eof) => Some(Step::Accept),
            _ => None,
        }
    }

    pub fn expected(self) -> &'static str {
        match self {
            HeaderState::Start => "version line",
            HeaderState::Version => "cmd line",
            HeaderState::Command => "part line",
            HeaderState::Part => "events line",
            HeaderState::Events => "fl= marker or end of input",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyState {
    /// Still inside the header lines
    Preamble,
    /// Got `fl=`, expecting `fn=`
    File,
    /// Got `fn=`, expecting the self cost or `summary:`
    Function,
    /// Got the self cost, expecting `fl=`, `cfn=` or end of input
    SelfCost,
    /// Got `cfn=`, expecting `calls=`
    CalledFunction,
    /// Got `calls=`, expecting the call's cost line
    Calls,
    /// Got a call cost, expecting `fl=`, `cfn=` or end of input
    CallCost,
    /// Got `summary:`, expecting the self cost
    Summary,
}

impl BodyState {
    pub fn transition(self, token: Token) -> Option<Step<BodyState>> {
        use BodyState::*;
        let next = match (self, token) {
            (Preamble, Token::HeaderLine) => Preamble,
            (Preamble | SelfCost | CallCost, Token::File) => File,
            (File, Token::Function) => Function,
            (Function | Summary, Token::Cost) => SelfCost,
            (Calls, Token::Cost) => CallCost,
            (SelfCost | CallCost, Token::CalledFunction) => CalledFunction,
            (CalledFunction, Token::Calls) => Calls,
            (Function, Token::Summary) => Summary,
            (Preamble | SelfCost | CallCost, Token::Eof) => return Some(Step::Accept),
            _ => return None,
        };
        Some(Step::Next(next))
    }

    pub fn expected(self) -> &'static str {
        match self {
            BodyState::Preamble => "header line, fl= marker or end of input",
            BodyState::File => "fn= marker",
            BodyState::Function => "cost line or summary line",
            BodyState::SelfCost | BodyState::CallCost => {
                "fl= marker, cfn= marker or end of input"
            }
            BodyState::CalledFunction => "calls= marker",
            BodyState::Calls => "cost line",
            BodyState::Summary => "cost line",
        }
    }
}
