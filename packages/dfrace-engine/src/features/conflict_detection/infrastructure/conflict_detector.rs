//! ConflictDetector - bounded per-address race classification
//!
//! ## Algorithm
//! For each new `MemoryActionRecord` on an address:
//! 1. Compare against every record still in the address history
//! 2. Skip records of the same task (no self-conflict)
//! 3. Skip causally ordered pairs (serial bags)
//! 4. Classify the pair (`ConflictKind::classify`) and report hits
//! 5. Append the record; evict the oldest when the window is full
//!
//! ## Performance
//! - Time: O(capacity) per record
//! - Space: O(addresses × capacity)

use std::collections::{HashMap, VecDeque};

use tracing::trace;

use crate::features::conflict_detection::domain::{
    Conflict, ConflictKind, ConflictTable, MemoryActionRecord,
};
use crate::features::happens_before::ports::CausalOrder;
use crate::shared::models::{Action, Address, FuncId, TaskId};

/// Default number of records kept per address
pub const DEFAULT_HISTORY_CAPACITY: usize = 5;

/// FIFO window of recent records on one address
pub type AddressHistory = VecDeque<MemoryActionRecord>;

/// Conflict detector
#[derive(Debug)]
pub struct ConflictDetector {
    capacity: usize,
    history: HashMap<Address, AddressHistory>,
    table: ConflictTable,
    records_seen: usize,
    conflicts_flagged: usize,
}

impl ConflictDetector {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Detector keeping `capacity` records per address (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            history: HashMap::new(),
            table: ConflictTable::new(),
            records_seen: 0,
            conflicts_flagged: 0,
        }
    }

    /// Record a single memory action of a task
    #[allow(clippy::too_many_arguments)]
    pub fn record_action<O: CausalOrder>(
        &mut self,
        order: &O,
        task_id: TaskId,
        address: Address,
        value: &str,
        line_no: u32,
        func_id: FuncId,
        is_write: bool,
    ) {
        let action = Action::new(task_id, address, value, line_no, func_id, is_write);
        self.record_access(order, action, None);
    }

    /// Record a first action plus optional trailing last write
    pub fn record_access<O: CausalOrder>(
        &mut self,
        order: &O,
        first: Action,
        last_write: Option<Action>,
    ) {
        self.save_task_actions(order, MemoryActionRecord::new(first, last_write));
    }

    /// Compare a record against its address history, then append it
    pub fn save_task_actions<O: CausalOrder>(&mut self, order: &O, record: MemoryActionRecord) {
        self.records_seen += 1;
        let history = self.history.entry(record.address).or_default();

        let mut flagged = Vec::new();
        for other in history.iter() {
            if other.task_id == record.task_id {
                continue;
            }
            if order.is_ordered(record.task_id, other.task_id) {
                continue;
            }
            if let Some(kind) = ConflictKind::classify(&record, other) {
                flagged.push((other.reported_action().clone(), kind));
            }
        }

        let action = record.reported_action().clone();
        history.push_back(record);
        if history.len() > self.capacity {
            history.pop_front();
        }

        for (other_action, kind) in flagged {
            self.report_conflict(order, action.clone(), other_action, kind);
        }
    }

    /// Insert a conflict under the `(name of action's task, name of other's task)` report
    pub fn report_conflict<O: CausalOrder>(
        &mut self,
        order: &O,
        action: Action,
        other: Action,
        kind: ConflictKind,
    ) {
        let name1 = order.task_name(action.task_id);
        let name2 = order.task_name(other.task_id);
        trace!(
            "Conflict on {:#x}: {} line {} vs {} line {} ({})",
            action.address,
            name1,
            action.line_no,
            name2,
            other.line_no,
            kind.as_str()
        );

        if self.table.insert(name1, name2, Conflict::new(action, other, kind)) {
            self.conflicts_flagged += 1;
        }
    }

    /// Current history window of an address
    pub fn history(&self, address: Address) -> Option<&AddressHistory> {
        self.history.get(&address)
    }

    /// Largest window across all addresses
    pub fn max_history_len(&self) -> usize {
        self.history.values().map(VecDeque::len).max().unwrap_or(0)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn table(&self) -> &ConflictTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut ConflictTable {
        &mut self.table
    }

    pub fn records_seen(&self) -> usize {
        self.records_seen
    }

    /// Distinct conflicts inserted so far (before validation)
    pub fn conflicts_flagged(&self) -> usize {
        self.conflicts_flagged
    }
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self::new()
    }
}
