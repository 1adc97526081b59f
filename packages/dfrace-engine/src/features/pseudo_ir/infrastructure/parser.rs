//! Pseudo-IR listing parser
//!
//! Positional, keyword-driven tokenization of LLVM-like text. Operand
//! positions shift with optional qualifiers (`nuw`, `nsw`, `volatile`, ...)
//! and with a type tag written before an arithmetic mnemonic. Shapes that
//! cannot be read become `Operation::Unknown`.

use std::io::BufRead;

use tracing::debug;

use crate::features::pseudo_ir::domain::{Instruction, Operation, TaskListings};

/// Qualifiers that may sit between an arithmetic mnemonic and its type
const ARITHMETIC_QUALIFIERS: &[&str] = &[
    "nuw", "nsw", "exact", "fast", "nnan", "ninf", "nsz", "arcp", "contract", "afn", "reassoc",
];

/// Qualifiers that may follow `load`/`store`
const MEMORY_QUALIFIERS: &[&str] = &["volatile", "atomic"];

/// Call prefixes (`tail call`, ...)
const CALL_PREFIXES: &[&str] = &["tail", "musttail", "notail"];

/// Default debug-intrinsic marker
pub const DEFAULT_DEBUG_MARKER: &str = "llvm.dbg";

/// Split on commas and whitespace, dropping empty tokens
fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect()
}

fn is_value_token(token: &str) -> bool {
    token.starts_with('%') || token.starts_with('@')
}

fn skip_qualifiers(tokens: &[&str], mut idx: usize, qualifiers: &[&str]) -> usize {
    while idx < tokens.len() && qualifiers.contains(&tokens[idx]) {
        idx += 1;
    }
    idx
}

fn owned(token: Option<&&str>) -> Option<String> {
    token.map(|t| t.to_string())
}

/// Name of the called function (`@f(i32` → `@f`)
fn callee(tokens: &[&str]) -> Option<String> {
    tokens
        .iter()
        .find(|t| t.starts_with('@'))
        .and_then(|t| t.split('(').next())
        .map(str::to_string)
}

/// Parse the text of one instruction (without the `<lineNo>:` prefix)
pub fn parse_instruction(line_no: u32, text: &str) -> Instruction {
    let raw_text = text.trim().to_string();
    let tokens = tokenize(text);

    let (destination, body) = match tokens.as_slice() {
        [dest, "=", rest @ ..] => (Some(dest.to_string()), rest),
        rest => (None, rest),
    };

    let Some(&keyword) = body.first() else {
        return Instruction::unknown(line_no, "", raw_text);
    };

    let mut instr = Instruction {
        line_no,
        operation: Operation::Unknown(keyword.to_string()),
        destination,
        operand1: None,
        operand2: None,
        raw_text,
    };

    match keyword {
        "alloca" => {
            instr.operation = Operation::Alloca;
            instr.operand1 = owned(body.get(1));
        }
        "bitcast" => match body.get(2) {
            // bitcast <ty> <value> to <ty2>
            Some(source) => {
                instr.operation = Operation::Bitcast;
                instr.operand1 = Some(source.to_string());
            }
            None => return Instruction::unknown(line_no, keyword, instr.raw_text),
        },
        "load" => {
            let start = skip_qualifiers(body, 1, MEMORY_QUALIFIERS);
            match body[start.min(body.len())..].iter().find(|t| is_value_token(t)) {
                Some(pointer) => {
                    instr.operation = Operation::Load;
                    instr.operand1 = Some(pointer.to_string());
                }
                None => return Instruction::unknown(line_no, keyword, instr.raw_text),
            }
        }
        "store" => {
            // store [volatile] <ty> <value>, <ptrty> <pointer>
            let idx = skip_qualifiers(body, 1, MEMORY_QUALIFIERS);
            match (body.get(idx + 1), body.get(idx + 3)) {
                (Some(value), Some(pointer)) => {
                    instr.operation = Operation::Store;
                    instr.operand1 = Some(value.to_string());
                    instr.destination = Some(pointer.to_string());
                }
                _ => return Instruction::unknown(line_no, keyword, instr.raw_text),
            }
        }
        "call" | "invoke" => {
            instr.operation = Operation::Call;
            instr.operand1 = callee(&body[1..]);
        }
        prefix if CALL_PREFIXES.contains(&prefix) && body.get(1) == Some(&"call") => {
            instr.operation = Operation::Call;
            instr.operand1 = callee(&body[2..]);
        }
        _ => {
            // <mnemonic> [quals] <ty> <op1>, <op2>  or  <ty> <mnemonic> [quals] <op1>, <op2>
            let (operation, after_mnemonic, typed) =
                match Operation::from_arithmetic_mnemonic(keyword) {
                    Some(op) => (op, 1, true),
                    None => match body.get(1).and_then(|m| Operation::from_arithmetic_mnemonic(m)) {
                        Some(op) => (op, 2, false),
                        None => return instr,
                    },
                };

            let mut idx = skip_qualifiers(body, after_mnemonic, ARITHMETIC_QUALIFIERS);
            if typed {
                idx += 1;
            }
            match (body.get(idx), body.get(idx + 1)) {
                (Some(op1), Some(op2)) => {
                    instr.operation = operation;
                    instr.operand1 = Some(op1.to_string());
                    instr.operand2 = Some(op2.to_string());
                }
                _ => {
                    return Instruction::unknown(line_no, keyword, instr.raw_text);
                }
            }
        }
    }

    instr
}

/// Parse one `<lineNo>: <text>` listing line
///
/// A missing or non-numeric line number yields an opaque instruction at line 0.
pub fn parse_listing_line(line: &str) -> Instruction {
    let trimmed = line.trim();
    match trimmed.split_once(':') {
        Some((num, text)) => match num.trim().parse::<u32>() {
            Ok(line_no) => parse_instruction(line_no, text),
            Err(_) => Instruction::unknown(0, "", trimmed),
        },
        None => Instruction::unknown(0, "", trimmed),
    }
}

/// Parse the listing of one task, in program order
pub fn parse_task_listing<'a, I>(task_name: &str, lines: I) -> Vec<Instruction>
where
    I: IntoIterator<Item = &'a str>,
{
    let instructions: Vec<Instruction> = lines
        .into_iter()
        .filter(|l| !l.trim().is_empty())
        .map(parse_listing_line)
        .collect();
    debug!(
        "Parsed {} instructions for task {}",
        instructions.len(),
        task_name
    );
    instructions
}

/// Groups an IR log into per-task listings
#[derive(Debug, Clone)]
pub struct IrLogParser {
    debug_marker: String,
}

impl IrLogParser {
    pub fn new() -> Self {
        Self::with_debug_marker(DEFAULT_DEBUG_MARKER)
    }

    pub fn with_debug_marker(marker: impl Into<String>) -> Self {
        Self {
            debug_marker: marker.into(),
        }
    }

    /// A trimmed line without interior whitespace names a task
    fn is_task_name_line(line: &str) -> bool {
        !line.is_empty() && !line.contains(char::is_whitespace)
    }

    /// Parse IR log text held in memory
    pub fn parse_str(&self, content: &str) -> TaskListings {
        let mut groups: Vec<(String, Vec<&str>)> = Vec::new();

        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.contains(self.debug_marker.as_str()) {
                continue;
            }
            if Self::is_task_name_line(trimmed) {
                groups.push((trimmed.to_string(), Vec::new()));
                continue;
            }
            match groups.last_mut() {
                Some((_, lines)) => lines.push(trimmed),
                None => debug!("IR line before any task name ignored: {}", trimmed),
            }
        }

        let mut listings = TaskListings::new();
        for (name, lines) in groups {
            if listings.contains_key(&name) {
                debug!("Repeated IR listing for task {} ignored", name);
                continue;
            }
            let instructions = parse_task_listing(&name, lines);
            listings.insert(name, instructions);
        }
        listings
    }

    /// Parse an IR log from a reader
    pub fn parse_reader<R: BufRead>(&self, mut reader: R) -> std::io::Result<TaskListings> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Ok(self.parse_str(&content))
    }
}

impl Default for IrLogParser {
    fn default() -> Self {
        Self::new()
    }
}
