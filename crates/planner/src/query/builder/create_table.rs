use crate::query::ast::{
    common::TableRef,
    create_table::{ColumnDef, CreateTable},
};
use model::schema::table::TableSchema;

#[derive(Debug, Clone)]
pub struct CreateTableBuilder {
    ast: CreateTable,
}

impl CreateTableBuilder {
    pub fn new(table: TableRef) -> Self {
        Self {
            ast: CreateTable {
                table,
                ..Default::default()
            },
        }
    }

    pub fn from_schema(schema: &TableSchema) -> Self {
        let columns = schema
            .columns
            .iter()
            .map(|c| ColumnDef {
                name: c.name.to_string(),
                data_type: c.data_type,
            })
            .collect();
        Self::new(TableRef::new(schema.table.as_str())).columns(columns)
    }

    pub fn columns(mut self, columns: Vec<ColumnDef>) -> Self {
        self.ast.columns = columns;
        self
    }

    pub fn quoted(mut self, quote_identifiers: bool) -> Self {
        self.ast.quote_identifiers = quote_identifiers;
        self
    }

    pub fn build(self) -> CreateTable {
        self.ast
    }
}
