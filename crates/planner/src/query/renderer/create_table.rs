use crate::query::{
    ast::create_table::CreateTable,
    renderer::{Render, Renderer},
};

impl Render for CreateTable {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("CREATE TABLE ");
        r.render_table_ref(&self.table, self.quote_identifiers);
        r.sql.push_str(" (");
        for (i, col) in self.columns.iter().enumerate() {
            if i > 0 {
                r.sql.push_str(", ");
            }
            r.render_ident(&col.name, self.quote_identifiers);
            r.sql.push(' ');
            let type_name = r.dialect.render_data_type(&col.data_type);
            r.sql.push_str(&type_name);
        }
        r.sql.push(')');
    }
}

#[cfg(test)]
mod tests {
    use crate::query::{
        ast::{
            common::TableRef,
            create_table::{ColumnDef, CreateTable},
        },
        dialect::Sqlite,
        renderer::{Render, Renderer},
    };
    use model::core::data_type::ColumnType;

    fn ast(quote_identifiers: bool) -> CreateTable {
        CreateTable {
            table: TableRef::new("scores"),
            columns: vec![
                ColumnDef {
                    name: "id".into(),
                    data_type: ColumnType::Integer,
                },
                ColumnDef {
                    name: "name".into(),
                    data_type: ColumnType::Text,
                },
                ColumnDef {
                    name: "score".into(),
                    data_type: ColumnType::Real,
                },
            ],
            quote_identifiers,
        }
    }

    #[test]
    fn test_render_create_table_bare() {
        let mut renderer = Renderer::new(&Sqlite);
        ast(false).render(&mut renderer);
        assert_eq!(
            renderer.finish(),
            "CREATE TABLE scores (id INTEGER, name TEXT, score REAL)"
        );
    }

    #[test]
    fn test_render_create_table_quoted() {
        let mut renderer = Renderer::new(&Sqlite);
        ast(true).render(&mut renderer);
        assert_eq!(
            renderer.finish(),
            "CREATE TABLE `scores` (`id` INTEGER, `name` TEXT, `score` REAL)"
        );
    }
}
