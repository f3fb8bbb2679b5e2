//! Defines the core rendering trait and context for converting AST to SQL.

use crate::query::{ast::common::TableRef, dialect::Dialect};

pub mod create_table;
pub mod insert;

/// A trait for any AST node that can be rendered into a SQL string.
pub trait Render {
    fn render(&self, renderer: &mut Renderer);
}

/// Accumulates the SQL text and hands out positional placeholders.
pub struct Renderer<'a> {
    pub sql: String,
    pub placeholders: usize,
    pub dialect: &'a dyn Dialect,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            sql: String::new(),
            placeholders: 0,
            dialect,
        }
    }

    /// Consumes the renderer and returns the final SQL string.
    pub fn finish(self) -> String {
        self.sql
    }

    pub fn add_placeholder(&mut self) {
        let placeholder = self.dialect.get_placeholder(self.placeholders);
        self.placeholders += 1;
        self.sql.push_str(&placeholder);
    }

    pub fn render_ident(&mut self, ident: &str, quoted: bool) {
        if quoted {
            let quoted = self.dialect.quote_identifier(ident);
            self.sql.push_str(&quoted);
        } else {
            self.sql.push_str(ident);
        }
    }

    pub fn render_table_ref(&mut self, table: &TableRef, quoted: bool) {
        self.render_ident(&table.name, quoted);
    }
}
