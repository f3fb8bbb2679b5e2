use crate::query::ast::{common::TableRef, insert::Insert};
use model::schema::table::TableSchema;

#[derive(Debug, Clone)]
pub struct InsertBuilder {
    ast: Insert,
}

impl InsertBuilder {
    pub fn new(table: TableRef) -> Self {
        Self {
            ast: Insert {
                table,
                columns: Vec::new(),
            },
        }
    }

    pub fn from_schema(schema: &TableSchema) -> Self {
        let columns = schema.column_names().map(|n| n.to_string()).collect();
        Self::new(TableRef::new(schema.table.as_str())).columns(columns)
    }

    pub fn columns(mut self, columns: Vec<String>) -> Self {
        self.ast.columns = columns;
        self
    }

    pub fn build(self) -> Insert {
        self.ast
    }
}

#[cfg(test)]
mod tests {
    use crate::query::{ast::common::TableRef, builder::insert::InsertBuilder};

    #[test]
    fn test_insert_builder() {
        let ast = InsertBuilder::new(TableRef::new("users"))
            .columns(vec!["id".into()])
            .build();
        assert_eq!(ast.table.name, "users");
        assert_eq!(ast.columns, vec!["id".to_string()]);
    }
}
