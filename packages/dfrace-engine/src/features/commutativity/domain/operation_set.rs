/// Commuting-class accumulator
use crate::features::pseudo_ir::domain::Operation;
use std::collections::HashSet;

/// Arithmetic operations that are mutually order-independent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommutingClass {
    /// ADD / SUB
    Additive,
    /// MUL / DIV
    Multiplicative,
}

impl CommutingClass {
    pub fn of(operation: &Operation) -> Option<Self> {
        match operation {
            Operation::Add | Operation::Sub => Some(CommutingClass::Additive),
            Operation::Mul | Operation::Div => Some(CommutingClass::Multiplicative),
            _ => None,
        }
    }
}

/// Arithmetic operations accepted so far along one backward walk
///
/// Cleared per validation query.
#[derive(Debug, Clone, Default)]
pub struct OperationSet {
    seen: HashSet<Operation>,
}

impl OperationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `operation` if its class agrees with every accepted one.
    /// Non-arithmetic operations are never accepted.
    pub fn accept(&mut self, operation: &Operation) -> bool {
        let Some(class) = CommutingClass::of(operation) else {
            return false;
        };
        let compatible = self
            .seen
            .iter()
            .all(|seen| CommutingClass::of(seen) == Some(class));
        if compatible {
            self.seen.insert(operation.clone());
        }
        compatible
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
