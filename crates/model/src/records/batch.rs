/// Rows bound for one batched insert, in arrival order.
///
/// The loader flushes as soon as `len() == capacity()`, so a buffer never
/// holds more than `capacity` rows when a flush is triggered.
#[derive(Debug, Clone)]
pub struct BatchBuffer {
    rows: Vec<Vec<String>>,
    capacity: usize,
}

/// Upper bound on the up-front allocation; larger buffers grow on demand.
const MAX_PREALLOC: usize = 16 * 1024;

impl BatchBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        BatchBuffer {
            rows: Vec::with_capacity(capacity.min(MAX_PREALLOC)),
            capacity,
        }
    }

    /// A buffer whose owner decides when to flush.
    pub fn unbounded() -> Self {
        BatchBuffer {
            rows: Vec::new(),
            capacity: usize::MAX,
        }
    }

    pub fn push(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.rows.len() >= self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Empties the buffer but keeps its allocation for the next cycle.
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
