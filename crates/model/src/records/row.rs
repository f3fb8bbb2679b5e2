/// Cells split from one input line. Lives only while that line is processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line number in the source, when the reader knows it.
    pub line: u64,
    pub cells: Vec<String>,
}

impl RawRow {
    pub fn new(line: u64, cells: Vec<String>) -> Self {
        RawRow { line, cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True when the original line was empty after trimming.
    ///
    /// Delimiters only vanish under trimming when they are whitespace
    /// themselves, so a multi-cell row counts as blank only in that case.
    pub fn is_blank(&self, delimiter: char) -> bool {
        let cells_blank = self.cells.iter().all(|c| c.trim().is_empty());
        cells_blank && (self.cells.len() <= 1 || delimiter.is_whitespace())
    }

    pub fn into_cells(self) -> Vec<String> {
        self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::RawRow;

    fn row(cells: &[&str]) -> RawRow {
        RawRow::new(1, cells.iter().map(|c| c.to_string()).collect())
    }

    #[test]
    fn test_blank_detection() {
        assert!(row(&["   "]).is_blank('\t'));
        assert!(row(&["", " ", ""]).is_blank('\t'));
        assert!(!row(&["", ""]).is_blank(','));
        assert!(!row(&["x"]).is_blank('\t'));
        assert!(row(&[]).is_blank(','));
    }
}
