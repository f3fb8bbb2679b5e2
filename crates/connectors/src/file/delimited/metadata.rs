use model::{
    core::{data_type::ColumnType, identifiers::Identifier},
    schema::table::{ColumnSpec, TableSchema},
};

/// Builds one column per header cell, typed from the matching sample cell.
///
/// A sample whose width differs from the header is ignored, which leaves
/// every column as `TEXT`. Name collisions are left for
/// [`TableSchema::resolve`].
pub fn infer_schema(table: Identifier, header: &[String], sample: Option<&[String]>) -> TableSchema {
    let sample = sample.filter(|cells| cells.len() == header.len());

    let columns = header
        .iter()
        .enumerate()
        .map(|(ordinal, raw)| ColumnSpec {
            name: Identifier::sanitize(raw),
            data_type: sample
                .map(|cells| ColumnType::infer(&cells[ordinal]))
                .unwrap_or_default(),
            ordinal,
            raw_name: raw.clone(),
        })
        .collect();

    TableSchema::new(table, columns)
}

/// Line-oriented form of [`infer_schema`]: the header is trimmed, then both
/// lines are split on `delimiter`.
pub fn infer_schema_from_lines(
    table: Identifier,
    header_line: &str,
    sample_line: Option<&str>,
    delimiter: char,
) -> TableSchema {
    let header = split_line(header_line.trim(), delimiter);
    let sample = sample_line.map(|line| split_line(line, delimiter));
    infer_schema(table, &header, sample.as_deref())
}

/// Splits on every occurrence of `delimiter`, keeping empty trailing cells.
pub fn split_line(line: &str, delimiter: char) -> Vec<String> {
    line.split(delimiter).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players() -> Identifier {
        Identifier::sanitize("players")
    }

    #[test]
    fn test_types_from_sample_line() {
        let schema =
            infer_schema_from_lines(players(), "id\tname\tscore", Some("1\tleo\t9.5"), '\t');

        let types: Vec<_> = schema.columns.iter().map(|c| c.data_type).collect();
        assert_eq!(
            types,
            vec![ColumnType::Integer, ColumnType::Text, ColumnType::Real]
        );
        let names: Vec<_> = schema.column_names().map(|n| n.as_str()).collect();
        assert_eq!(names, vec!["id", "name", "score"]);
    }

    #[test]
    fn test_one_column_per_header_field_in_order() {
        let schema = infer_schema_from_lines(players(), "  Z\tA-b\tc c\t\t", None, '\t');

        // Trimming the header drops the trailing empty fields.
        assert_eq!(schema.num_columns(), 3);
        let raw: Vec<_> = schema.columns.iter().map(|c| c.raw_name.as_str()).collect();
        assert_eq!(raw, vec!["Z", "A-b", "c c"]);
        let ordinals: Vec<_> = schema.columns.iter().map(|c| c.ordinal).collect();
        assert_eq!(ordinals, vec![0, 1, 2]);
        assert!(schema.columns.iter().all(|c| c.data_type == ColumnType::Text));
    }

    #[test]
    fn test_sample_of_wrong_width_is_ignored() {
        let schema = infer_schema_from_lines(players(), "a,b", Some("1,2,3"), ',');
        assert!(schema.columns.iter().all(|c| c.data_type == ColumnType::Text));
    }

    #[test]
    fn test_mixed_cells() {
        let schema = infer_schema_from_lines(
            players(),
            "a|b|c|d|e",
            Some("42|42.5|abc|42abc|"),
            '|',
        );
        let types: Vec<_> = schema.columns.iter().map(|c| c.data_type).collect();
        assert_eq!(
            types,
            vec![
                ColumnType::Integer,
                ColumnType::Real,
                ColumnType::Text,
                ColumnType::Text,
                ColumnType::Text,
            ]
        );
    }

    #[test]
    fn test_split_keeps_empty_cells() {
        assert_eq!(split_line("a\t\tb\t", '\t'), vec!["a", "", "b", ""]);
    }
}
