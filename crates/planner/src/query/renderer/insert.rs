use crate::query::{
    ast::insert::Insert,
    renderer::{Render, Renderer},
};

impl Render for Insert {
    fn render(&self, r: &mut Renderer) {
        // 1. INSERT INTO `table` (`a`,`b`)
        r.sql.push_str("INSERT INTO ");
        r.render_table_ref(&self.table, true);
        r.sql.push_str(" (");
        let quoted_columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| r.dialect.quote_identifier(c))
            .collect();
        r.sql.push_str(&quoted_columns.join(","));
        r.sql.push(')');

        // 2. VALUES (?,?)
        r.sql.push_str(" VALUES (");
        for i in 0..self.columns.len() {
            if i > 0 {
                r.sql.push(',');
            }
            r.add_placeholder();
        }
        r.sql.push(')');
    }
}

#[cfg(test)]
mod tests {
    use crate::query::{
        ast::{common::TableRef, insert::Insert},
        dialect::Sqlite,
        renderer::{Render, Renderer},
    };

    #[test]
    fn test_render_insert_template() {
        let ast = Insert {
            table: TableRef::new("users"),
            columns: vec!["name".to_string(), "order".to_string()],
        };

        let mut renderer = Renderer::new(&Sqlite);
        ast.render(&mut renderer);
        assert_eq!(renderer.placeholders, 2);
        assert_eq!(
            renderer.finish(),
            "INSERT INTO `users` (`name`,`order`) VALUES (?,?)"
        );
    }

    #[test]
    fn test_render_insert_single_column() {
        let ast = Insert {
            table: TableRef::new("t"),
            columns: vec!["a".to_string()],
        };
        let mut renderer = Renderer::new(&Sqlite);
        ast.render(&mut renderer);
        assert_eq!(renderer.finish(), "INSERT INTO `t` (`a`) VALUES (?)");
    }
}
