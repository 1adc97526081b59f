//! Line parsers for the HB log and the trace log
//!
//! Both logs are whitespace-tokenized. Blank lines parse to `None`; any
//! shape error is returned so the caller can count and skip the line.

use super::error::{LogParseError, Result};
use crate::features::trace_log::domain::{HbEdge, TraceEvent};
use crate::shared::models::{Action, Address};

/// Separator between a first action and its trailing last write
const ACTION_SEPARATOR: &str = "::";

/// Tokens in one memory action: `<taskId> <W|R> <addr> <value> <line> <funcId>`
const ACTION_FIELDS: usize = 6;

/// Parse one HB log line: `<childTaskId> <parentTaskId>`
pub fn parse_hb_line(line: &str) -> Result<Option<HbEdge>> {
    let mut tokens = line.split_whitespace();
    let child = match tokens.next() {
        Some(tok) => parse_int(tok)?,
        None => return Ok(None),
    };
    let parent = tokens
        .next()
        .ok_or(LogParseError::MissingFields {
            expected: 2,
            found: 1,
        })
        .and_then(parse_int)?;

    Ok(Some(HbEdge { child, parent }))
}

/// Parse one trace log line
pub fn parse_trace_line(line: &str) -> Result<Option<TraceEvent>> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return Ok(None);
    }
    if tokens.len() < 2 {
        return Err(LogParseError::MissingFields {
            expected: 2,
            found: tokens.len(),
        });
    }

    let id = parse_int(tokens[0])?;
    let event = match tokens[1] {
        "F" => TraceEvent::FunctionRegistration {
            func_id: id,
            name: join_rest(&tokens[2..]),
        },
        "B" => TraceEvent::TaskBegin {
            task_id: id,
            name: join_rest(&tokens[2..]),
        },
        "W" | "R" => parse_memory_access(&tokens)?,
        tag => TraceEvent::Other {
            id,
            tag: tag.to_string(),
        },
    };

    Ok(Some(event))
}

fn parse_memory_access(tokens: &[&str]) -> Result<TraceEvent> {
    let first = parse_action(tokens)?;

    let rest = &tokens[ACTION_FIELDS..];
    let last_write = match rest.first() {
        None => None,
        Some(tok) if *tok == ACTION_SEPARATOR => Some(parse_action(&rest[1..])?),
        Some(tok) => return Err(LogParseError::TrailingToken(tok.to_string())),
    };

    Ok(TraceEvent::MemoryAccess { first, last_write })
}

/// Parse the leading `ACTION_FIELDS` tokens as one action
fn parse_action(tokens: &[&str]) -> Result<Action> {
    if tokens.len() < ACTION_FIELDS {
        return Err(LogParseError::MissingFields {
            expected: ACTION_FIELDS,
            found: tokens.len(),
        });
    }

    let task_id = parse_int(tokens[0])?;
    let is_write = match tokens[1] {
        "W" => true,
        "R" => false,
        other => return Err(LogParseError::InvalidAccessTag(other.to_string())),
    };
    let address = parse_address(tokens[2])?;
    let value = tokens[3];
    let line_no = parse_int(tokens[4])?;
    let func_id = parse_int(tokens[5])?;

    Ok(Action::new(task_id, address, value, line_no, func_id, is_write))
}

/// Parse a hex address with or without `0x` prefix
pub fn parse_address(token: &str) -> Result<Address> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    Address::from_str_radix(digits, 16)
        .map_err(|_| LogParseError::InvalidAddress(token.to_string()))
}

fn parse_int<T: std::str::FromStr>(token: &str) -> Result<T> {
    token
        .parse()
        .map_err(|_| LogParseError::InvalidInteger(token.to_string()))
}

fn join_rest(tokens: &[&str]) -> String {
    tokens.join(" ")
}
