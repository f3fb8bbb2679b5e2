use crate::sql::base::error::DbError;

/// A prepared statement that collects parameter rows and runs them together.
///
/// Each `execute_batch` call is its own unit of durability: a later failure
/// never undoes rows an earlier call already committed.
pub trait BatchStatement {
    /// Queues one row of parameters, bound as text.
    fn add_to_batch(&mut self, params: Vec<String>) -> Result<(), DbError>;

    /// Runs every queued row and returns the number of rows affected.
    /// The queue is left untouched; call `clear_batch` afterwards.
    fn execute_batch(&mut self) -> Result<usize, DbError>;

    fn clear_batch(&mut self);

    /// Rows queued since the last `clear_batch`.
    fn pending(&self) -> usize;

    /// Releases the statement. Rows still queued are discarded.
    fn close(self) -> Result<(), DbError>
    where
        Self: Sized;
}
