use crate::file::delimited::{error::FileError, metadata::infer_schema, settings::DelimitedSettings};
use model::{core::identifiers::Identifier, records::row::RawRow, schema::table::TableSchema};
use std::{collections::VecDeque, fs::File, io::Read, path::Path};
use tracing::debug;

/// Line-at-a-time reader over a delimited text source.
///
/// Comment lines and empty lines never reach the caller. Lines consumed while
/// looking for a type sample are parked in a look-ahead queue and handed out
/// again by [`next_row`](Self::next_row), so inference does not eat rows.
pub struct DelimitedReader<R: Read> {
    reader: csv::Reader<R>,
    settings: DelimitedSettings,
    record: csv::ByteRecord,
    lookahead: VecDeque<RawRow>,
    /// Used in error messages.
    name: String,
    header_read: bool,
}

impl DelimitedReader<File> {
    pub fn from_path(path: impl AsRef<Path>, settings: DelimitedSettings) -> Result<Self, FileError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| FileError::from_open(path, err))?;
        Ok(DelimitedReader::new(file, settings)?.named(path.display().to_string()))
    }
}

impl<R: Read> DelimitedReader<R> {
    /// Fails with [`FileError::InvalidSettings`] when the settings cannot drive a byte-level split.
    pub fn new(source: R, settings: DelimitedSettings) -> Result<Self, FileError> {
        settings.validate().map_err(FileError::InvalidSettings)?;
        let reader = csv::ReaderBuilder::new()
            .delimiter(settings.delimiter_byte().map_err(FileError::InvalidSettings)?)
            .comment(Some(settings.comment_byte().map_err(FileError::InvalidSettings)?))
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(source);

        Ok(DelimitedReader {
            reader,
            settings,
            record: csv::ByteRecord::new(),
            lookahead: VecDeque::new(),
            name: "<input>".to_string(),
            header_read: false,
        })
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn settings(&self) -> &DelimitedSettings {
        &self.settings
    }

    /// Number of lines currently parked by the sample search.
    pub fn buffered(&self) -> usize {
        self.lookahead.len()
    }

    /// Reads the header and a type sample, then builds the unresolved schema.
    pub fn read_schema(&mut self, table: Identifier) -> Result<TableSchema, FileError> {
        let header = self
            .read_header()?
            .ok_or_else(|| FileError::MissingHeader(self.name.clone()))?;

        let sample = self.find_sample(header.len())?;
        match &sample {
            Some(row) => debug!("Type sample for '{}' found on line {}", table, row.line),
            None => debug!(
                "No type sample within {} lines of '{}'; all columns default to TEXT",
                self.settings.sample_lookahead, self.name
            ),
        }

        Ok(infer_schema(
            table,
            &header.cells,
            sample.as_ref().map(|row| row.cells.as_slice()),
        ))
    }

    /// Returns the first non-blank line, trimmed as a whole before splitting.
    ///
    /// Only meaningful as the first read; a second call returns `None`.
    pub fn read_header(&mut self) -> Result<Option<RawRow>, FileError> {
        if self.header_read {
            return Ok(None);
        }
        self.header_read = true;

        while let Some(row) = self.read_line()? {
            if row.is_blank(self.settings.delimiter) {
                continue;
            }
            return Ok(Some(trim_row(row, self.settings.delimiter)));
        }
        Ok(None)
    }

    /// Scans ahead for the first non-blank line with exactly `num_columns`
    /// cells, looking at no more than `sample_lookahead` lines.
    pub fn find_sample(&mut self, num_columns: usize) -> Result<Option<RawRow>, FileError> {
        let delimiter = self.settings.delimiter;
        let is_sample = |row: &RawRow| row.len() == num_columns && !row.is_blank(delimiter);

        if let Some(row) = self.lookahead.iter().find(|row| is_sample(*row)) {
            return Ok(Some(row.clone()));
        }

        while self.lookahead.len() < self.settings.sample_lookahead {
            let Some(row) = self.read_line()? else {
                break;
            };
            let found = is_sample(&row);
            self.lookahead.push_back(row);
            if found {
                return Ok(self.lookahead.back().cloned());
            }
        }
        Ok(None)
    }

    /// Next data line: parked look-ahead lines first, then the stream.
    pub fn next_row(&mut self) -> Result<Option<RawRow>, FileError> {
        if let Some(row) = self.lookahead.pop_front() {
            return Ok(Some(row));
        }
        self.read_line()
    }

    fn read_line(&mut self) -> Result<Option<RawRow>, FileError> {
        if !self.reader.read_byte_record(&mut self.record)? {
            return Ok(None);
        }
        let line = self.record.position().map(|p| p.line()).unwrap_or_default();
        let cells = self
            .record
            .iter()
            .map(|cell| String::from_utf8_lossy(cell).into_owned())
            .collect();
        Ok(Some(RawRow::new(line, cells)))
    }
}

impl<R: Read> Iterator for DelimitedReader<R> {
    type Item = Result<RawRow, FileError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row().transpose()
    }
}

fn trim_row(row: RawRow, delimiter: char) -> RawRow {
    let delim = delimiter.to_string();
    let joined = row.cells.join(&delim);
    let cells = joined.trim().split(delimiter).map(str::to_string).collect();
    RawRow::new(row.line, cells)
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::core::data_type::ColumnType;
    use std::io::Write;

    fn reader(input: &str) -> DelimitedReader<&[u8]> {
        DelimitedReader::new(input.as_bytes(), DelimitedSettings::default()).unwrap()
    }

    fn table() -> Identifier {
        Identifier::sanitize("t")
    }

    fn drain(reader: &mut DelimitedReader<&[u8]>) -> Vec<Vec<String>> {
        reader.map(|row| row.unwrap().cells).collect()
    }

    #[test]
    fn test_sample_row_is_replayed() {
        let mut r = reader("id\tname\n1\tleo\n2\tmia\n");
        let schema = r.read_schema(table()).unwrap();

        assert_eq!(schema.columns[0].data_type, ColumnType::Integer);
        assert_eq!(r.buffered(), 1);
        assert_eq!(
            drain(&mut r),
            vec![vec!["1", "leo"], vec!["2", "mia"]]
        );
    }

    #[test]
    fn test_skips_comments_and_blank_lines_before_header() {
        let mut r = reader("# generated\n\n   \n  a\tb  \n#x\n3\t4\n");
        let schema = r.read_schema(table()).unwrap();

        let names: Vec<_> = schema.column_names().map(|n| n.to_string()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(schema.columns[1].data_type, ColumnType::Integer);
        assert_eq!(drain(&mut r), vec![vec!["3", "4"]]);
    }

    #[test]
    fn test_malformed_lines_before_sample_are_kept() {
        let mut r = reader("a\tb\nbad\n \t \n1.5\tx\n");
        let schema = r.read_schema(table()).unwrap();

        assert_eq!(schema.columns[0].data_type, ColumnType::Real);
        assert_eq!(r.buffered(), 3);
        let rows = drain(&mut r);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["bad"]);
        assert_eq!(rows[2], vec!["1.5", "x"]);
    }

    #[test]
    fn test_no_sample_within_lookahead_defaults_to_text() {
        let settings = DelimitedSettings::default().with_sample_lookahead(2);
        let mut r = DelimitedReader::new("a\tb\nx\ny\n1\t2\n".as_bytes(), settings).unwrap();
        let schema = r.read_schema(table()).unwrap();

        assert!(schema.columns.iter().all(|c| c.data_type == ColumnType::Text));
        // Nothing is lost: the two scanned lines come back before the rest.
        let rows: Vec<_> = r.map(|row| row.unwrap().cells).collect();
        assert_eq!(rows, vec![vec!["x"], vec!["y"], vec!["1", "2"]]);
    }

    #[test]
    fn test_header_only_input() {
        let mut r = reader("a\tb\n");
        let schema = r.read_schema(table()).unwrap();
        assert_eq!(schema.num_columns(), 2);
        assert!(r.next_row().unwrap().is_none());
    }

    #[test]
    fn test_missing_header() {
        let mut r = reader("# only a comment\n\n  \n");
        let err = r.read_schema(table()).unwrap_err();
        assert!(matches!(err, FileError::MissingHeader(_)));
    }

    #[test]
    fn test_quotes_are_literal_and_trailing_cells_kept() {
        let mut r = DelimitedReader::new("\"a\",b,\n".as_bytes(), DelimitedSettings::new(',')).unwrap();
        let row = r.next_row().unwrap().unwrap();
        assert_eq!(row.cells, vec!["\"a\"", "b", ""]);
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let mut r = DelimitedReader::new(&b"a\tb\n\xff\tok\n"[..], DelimitedSettings::default()).unwrap();
        r.read_header().unwrap();
        let row = r.next_row().unwrap().unwrap();
        assert_eq!(row.cells, vec!["\u{FFFD}", "ok"]);
        assert_eq!(row.line, 2);
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "x\ty").unwrap();
        writeln!(file, "1\t2").unwrap();

        let mut r = DelimitedReader::from_path(file.path(), DelimitedSettings::default()).unwrap();
        let schema = r.read_schema(table()).unwrap();
        assert_eq!(schema.num_columns(), 2);
        assert_eq!(r.count(), 1);
    }

    #[test]
    fn test_from_path_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = DelimitedReader::from_path(dir.path().join("missing.tsv"), DelimitedSettings::default())
            .err()
            .unwrap();
        assert!(matches!(err, FileError::NotFound(_)));
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let err = DelimitedReader::new("a§b\n1§x\n".as_bytes(), DelimitedSettings::new('§'))
            .err()
            .unwrap();
        assert!(matches!(err, FileError::InvalidSettings(_)));
    }
}
