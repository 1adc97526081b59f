//! CommutativityAnalyzer - backward safety walk over pseudo-IR listings
//!
//! ## Algorithm
//! 1. Locate the last instruction of the task whose line equals the query,
//!    or failing that the last one on an earlier line
//! 2. It must be a STORE, otherwise the query is unsafe
//! 3. Walk backwards from the store following its value operand:
//!    - start of listing → safe
//!    - ALLOCA defining the operand → safe (fresh local memory)
//!    - BITCAST / LOAD / STORE defining the operand → follow `operand1`
//!    - CALL mentioning the operand → unsafe (may escape or alias)
//!    - ADD/SUB/MUL/DIV defining the operand → class must agree with the
//!      walk's OperationSet; both inputs must be safe
//!    - anything else → opaque, keep walking
//!
//! The walk is iterative: a stack of `(end, operand)` goals replaces the
//! recursion, evaluated depth-first so the first input of an arithmetic op
//! is fully resolved before the second.
//!
//! ## Known gap
//! Opaque instructions are assumed non-interfering.

use tracing::debug;

use crate::config::ArithmeticPolicy;
use crate::features::commutativity::domain::{CommutingClass, OperationSet};
use crate::features::commutativity::ports::SafetyOracle;
use crate::features::pseudo_ir::domain::{Instruction, Operation, TaskListings};

/// Commutativity analyzer over parsed task listings
#[derive(Debug, Clone, Default)]
pub struct CommutativityAnalyzer {
    listings: TaskListings,
    policy: ArithmeticPolicy,
}

impl CommutativityAnalyzer {
    pub fn new(listings: TaskListings) -> Self {
        Self::with_policy(listings, ArithmeticPolicy::default())
    }

    pub fn with_policy(listings: TaskListings, policy: ArithmeticPolicy) -> Self {
        Self { listings, policy }
    }

    pub fn listings(&self) -> &TaskListings {
        &self.listings
    }

    /// Index of the last instruction on `line_no` in program order, else
    /// the last instruction whose line precedes it
    pub fn locate(instructions: &[Instruction], line_no: u32) -> Option<usize> {
        instructions
            .iter()
            .rposition(|i| i.line_no == line_no)
            .or_else(|| instructions.iter().rposition(|i| i.line_no < line_no))
    }

    /// Is the store on `line_no` of `task_name` safe to reorder?
    pub fn check(&self, task_name: &str, line_no: u32) -> bool {
        let Some(instructions) = self.listings.get(task_name) else {
            debug!("No IR listing for task {}", task_name);
            return false;
        };
        let Some(index) = Self::locate(instructions, line_no) else {
            debug!("No instruction at line {} of task {}", line_no, task_name);
            return false;
        };

        let store = &instructions[index];
        if store.operation != Operation::Store {
            return false;
        }
        match &store.operand1 {
            Some(operand) => self.is_safe(instructions, index, operand),
            None => false,
        }
    }

    /// Backward walk from just before `index`, tracking `operand`
    pub fn is_safe(&self, instructions: &[Instruction], index: usize, operand: &str) -> bool {
        let mut operations = OperationSet::new();
        let mut goals: Vec<(usize, String)> = vec![(index, operand.to_string())];

        while let Some((mut end, mut operand)) = goals.pop() {
            let safe = loop {
                if end == 0 {
                    break true;
                }
                end -= 1;
                let instr = &instructions[end];
                let defines = instr.defines(&operand);

                match &instr.operation {
                    Operation::Alloca => {
                        if defines {
                            break true;
                        }
                    }
                    Operation::Bitcast | Operation::Store | Operation::Load => {
                        if defines {
                            if let Some(source) = &instr.operand1 {
                                operand = source.clone();
                            }
                        }
                    }
                    Operation::Call => {
                        if instr.raw_text.contains(operand.as_str()) {
                            break false;
                        }
                    }
                    Operation::Add | Operation::Sub | Operation::Mul | Operation::Div => {
                        if defines {
                            if !self.accept(&mut operations, &instr.operation) {
                                break false;
                            }
                            let (Some(lhs), Some(rhs)) = (&instr.operand1, &instr.operand2) else {
                                break false;
                            };
                            goals.push((end, rhs.clone()));
                            operand = lhs.clone();
                        }
                    }
                    Operation::Unknown(_) => {}
                }
            };

            if !safe {
                return false;
            }
        }

        true
    }

    fn accept(&self, operations: &mut OperationSet, operation: &Operation) -> bool {
        if self.policy == ArithmeticPolicy::RejectMultiplicative
            && CommutingClass::of(operation) == Some(CommutingClass::Multiplicative)
        {
            return false;
        }
        operations.accept(operation)
    }
}

impl SafetyOracle for CommutativityAnalyzer {
    fn is_commutatively_safe(&self, task_name: &str, line_no: u32) -> bool {
        self.check(task_name, line_no)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::pseudo_ir::infrastructure::IrLogParser;

    fn analyzer(log: &str) -> CommutativityAnalyzer {
        CommutativityAnalyzer::new(IrLogParser::new().parse_str(log))
    }

    #[test]
    fn test_alloca_add_store_is_safe() {
        let a = analyzer(
            "\
t
1: %x = alloca i32
2: %y = add i32 %x, 1
3: store i32 %y, i32* %x
",
        );
        assert!(a.is_commutatively_safe("t", 3));
    }

    #[test]
    fn test_call_mentioning_operand_is_unsafe() {
        let a = analyzer(
            "\
t
1: %x = alloca i32
2: call void @publish(i32* %x)
3: %y = add i32 %x, 1
4: store i32 %y, i32* %x
",
        );
        assert!(!a.is_commutatively_safe("t", 4));
    }

    #[test]
    fn test_unrelated_call_is_ignored() {
        let a = analyzer(
            "\
t
1: %x = alloca i32
2: call void @log(i32 %k)
3: %y = add i32 %x, 1
4: store i32 %y, i32* %x
",
        );
        assert!(a.is_commutatively_safe("t", 4));
    }

    #[test]
    fn test_non_store_is_unsafe() {
        let a = analyzer("t\n1: %x = alloca i32\n2: %v = load i32, i32* %x\n");
        assert!(!a.is_commutatively_safe("t", 2));
        assert!(!a.is_commutatively_safe("t", 99));
        assert!(!a.is_commutatively_safe("t", 0));
        assert!(!a.is_commutatively_safe("missing", 2));
    }

    #[test]
    fn test_mixed_commuting_classes_are_unsafe() {
        let log = "\
t
1: %a = alloca i32
2: %m = mul i32 %a, 3
3: %s = add i32 %m, 1
4: store i32 %s, i32* @g
";
        assert!(!analyzer(log).is_commutatively_safe("t", 4));
    }

    #[test]
    fn test_single_multiplicative_class_depends_on_policy() {
        let log = "\
t
1: %a = alloca i32
2: %m = mul i32 %a, 3
3: store i32 %m, i32* @g
";
        assert!(analyzer(log).is_commutatively_safe("t", 3));

        let strict = CommutativityAnalyzer::with_policy(
            IrLogParser::new().parse_str(log),
            ArithmeticPolicy::RejectMultiplicative,
        );
        assert!(!strict.is_commutatively_safe("t", 3));
    }

    #[test]
    fn test_bitcast_and_load_are_followed() {
        let log = "\
t
1: %a = alloca i32
2: %p = bitcast i32* %a to i8*
3: %v = load i32, i8* %p
4: %w = sub i32 %v, 2
5: store i32 %w, i32* @g
";
        assert!(analyzer(log).is_commutatively_safe("t", 5));
    }

    #[test]
    fn test_second_operand_checked_after_first() {
        // %x is safe (alloca) but %z escapes through the call
        let log = "\
t
1: %x = alloca i32
2: %z = call i32 @read()
3: %y = add i32 %x, %z
4: store i32 %y, i32* @g
";
        assert!(!analyzer(log).is_commutatively_safe("t", 4));
    }

    #[test]
    fn test_last_instruction_on_line_is_located() {
        let log = "\
t
1: %x = alloca i32
2: %v = load i32, i32* %x
2: %y = add i32 %v, 1
2: store i32 %y, i32* %x
";
        let listings = IrLogParser::new().parse_str(log);
        assert_eq!(CommutativityAnalyzer::locate(&listings["t"], 2), Some(3));
        assert!(CommutativityAnalyzer::new(listings).is_commutatively_safe("t", 2));
    }

    #[test]
    fn test_line_without_instructions_uses_preceding_store() {
        let log = "\
t
1: %x = alloca i32
2: %y = add i32 %x, 1
3: store i32 %y, i32* %x
6: %z = load i32, i32* %x
";
        let listings = IrLogParser::new().parse_str(log);
        assert_eq!(CommutativityAnalyzer::locate(&listings["t"], 4), Some(2));
        assert_eq!(CommutativityAnalyzer::locate(&listings["t"], 6), Some(3));
        assert_eq!(CommutativityAnalyzer::locate(&listings["t"], 0), None);

        let a = CommutativityAnalyzer::new(listings);
        assert!(a.is_commutatively_safe("t", 3));
        assert!(a.is_commutatively_safe("t", 4));
        assert!(!a.is_commutatively_safe("t", 7));
    }

    #[test]
    fn test_reaching_listing_start_is_safe() {
        let a = analyzer("t\n1: store i32 %arg, i32* @g\n");
        assert!(a.is_commutatively_safe("t", 1));
    }
}
