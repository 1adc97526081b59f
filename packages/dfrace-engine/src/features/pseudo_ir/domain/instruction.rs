/// Instruction model
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Instruction kind
///
/// Closed set; anything the parser does not recognize is `Unknown` and
/// treated as opaque by the analyses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Alloca,
    Bitcast,
    Call,
    Store,
    Load,
    Add,
    Sub,
    Mul,
    Div,
    /// Unrecognized keyword (kept for diagnostics)
    Unknown(String),
}

impl Operation {
    /// Map an arithmetic mnemonic (`add`, `fadd`, `sdiv`, `udiv`, ...) onto its operation
    pub fn from_arithmetic_mnemonic(keyword: &str) -> Option<Self> {
        match keyword {
            "add" | "fadd" => Some(Operation::Add),
            "sub" | "fsub" => Some(Operation::Sub),
            "mul" | "fmul" => Some(Operation::Mul),
            "div" | "sdiv" | "udiv" | "fdiv" => Some(Operation::Div),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Operation::Alloca => "ALLOCA",
            Operation::Bitcast => "BITCAST",
            Operation::Call => "CALL",
            Operation::Store => "STORE",
            Operation::Load => "LOAD",
            Operation::Add => "ADD",
            Operation::Sub => "SUB",
            Operation::Mul => "MUL",
            Operation::Div => "DIV",
            Operation::Unknown(keyword) => keyword,
        }
    }
}

/// One parsed listing line
///
/// For `STORE`, `destination` is the pointer written through and
/// `operand1` the stored value. For `LOAD`/`BITCAST`, `operand1` is the
/// source. For arithmetic, `operand1`/`operand2` are the two inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub line_no: u32,
    pub operation: Operation,
    pub destination: Option<String>,
    pub operand1: Option<String>,
    pub operand2: Option<String>,
    pub raw_text: String,
}

impl Instruction {
    /// Opaque instruction for unparseable text
    pub fn unknown(line_no: u32, keyword: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            line_no,
            operation: Operation::Unknown(keyword.into()),
            destination: None,
            operand1: None,
            operand2: None,
            raw_text: raw_text.into(),
        }
    }

    /// Does this instruction define `operand`?
    pub fn defines(&self, operand: &str) -> bool {
        self.destination.as_deref() == Some(operand)
    }
}

/// Parsed listings keyed by task name, each in program order
pub type TaskListings = BTreeMap<String, Vec<Instruction>>;
