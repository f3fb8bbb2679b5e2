//! Defines the AST for a parameterized single-row INSERT template.

use crate::query::ast::common::TableRef;

/// `INSERT INTO table (cols...) VALUES (?, ...)` with one positional
/// placeholder per column, meant to be prepared once and executed per row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Insert {
    pub table: TableRef,
    pub columns: Vec<String>,
}
