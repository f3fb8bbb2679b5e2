//! Defines the `Dialect` trait for database-specific SQL syntax.

use model::core::data_type::ColumnType;

pub trait Dialect: Send + Sync {
    /// Wraps an identifier (like a table or column name) in the dialect's
    /// quotation marks.
    fn quote_identifier(&self, ident: &str) -> String;

    /// Returns the placeholder for a parameterized query.
    fn get_placeholder(&self, index: usize) -> String;

    /// Renders a column type into the dialect's type name.
    fn render_data_type(&self, data_type: &ColumnType) -> String;
}

/// SQLite: back-tick quoting (accepted for MySQL compatibility), `?`
/// placeholders and the three affinity type names.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn quote_identifier(&self, ident: &str) -> String {
        format!("`{ident}`")
    }

    fn get_placeholder(&self, _index: usize) -> String {
        "?".into()
    }

    fn render_data_type(&self, data_type: &ColumnType) -> String {
        data_type.sql_name().into()
    }
}
