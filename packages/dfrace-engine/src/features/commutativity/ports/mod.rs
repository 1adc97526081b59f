//! Safety oracle port trait

/// Decides whether the store at a task's source line commutes with
/// concurrent stores to the same location
///
/// Allows for different implementations (the commutativity analyzer in
/// production, fixed answers in tests).
pub trait SafetyOracle {
    fn is_commutatively_safe(&self, task_name: &str, line_no: u32) -> bool;
}
