use serde::{Deserialize, Serialize};

pub const DEFAULT_DELIMITER: char = '\t';
pub const DEFAULT_COMMENT_MARKER: char = '#';
pub const DEFAULT_SAMPLE_LOOKAHEAD: usize = 10_000;

/// How a delimited text source is split into lines and cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelimitedSettings {
    pub delimiter: char,
    /// Lines starting with this character are skipped everywhere.
    pub comment_marker: char,
    /// Lines examined while looking for a type sample before giving up.
    pub sample_lookahead: usize,
}

impl Default for DelimitedSettings {
    fn default() -> Self {
        DelimitedSettings {
            delimiter: DEFAULT_DELIMITER,
            comment_marker: DEFAULT_COMMENT_MARKER,
            sample_lookahead: DEFAULT_SAMPLE_LOOKAHEAD,
        }
    }
}

impl DelimitedSettings {
    pub fn new(delimiter: char) -> Self {
        DelimitedSettings {
            delimiter,
            ..Default::default()
        }
    }

    pub fn with_comment_marker(mut self, marker: char) -> Self {
        self.comment_marker = marker;
        self
    }

    pub fn with_sample_lookahead(mut self, lines: usize) -> Self {
        self.sample_lookahead = lines;
        self
    }

    /// The reader works on single bytes; both markers must be ASCII and distinct.
    pub fn validate(&self) -> Result<(), String> {
        if !self.delimiter.is_ascii() {
            return Err(format!(
                "delimiter {:?} must be a single ASCII character",
                self.delimiter
            ));
        }
        if matches!(self.delimiter, '\n' | '\r') {
            return Err("delimiter cannot be a line terminator".to_string());
        }
        if !self.comment_marker.is_ascii() {
            return Err(format!(
                "comment marker {:?} must be a single ASCII character",
                self.comment_marker
            ));
        }
        if self.comment_marker == self.delimiter {
            return Err("comment marker and delimiter must differ".to_string());
        }
        if self.sample_lookahead == 0 {
            return Err("sample lookahead must be at least 1".to_string());
        }
        Ok(())
    }

    pub(crate) fn delimiter_byte(&self) -> Result<u8, String> {
        ascii_byte(self.delimiter, "delimiter")
    }

    pub(crate) fn comment_byte(&self) -> Result<u8, String> {
        ascii_byte(self.comment_marker, "comment marker")
    }
}

fn ascii_byte(c: char, what: &str) -> Result<u8, String> {
    u8::try_from(c)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| format!("{what} {c:?} must be a single ASCII character"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_tsv() {
        let s = DelimitedSettings::default();
        assert_eq!(s.delimiter, '\t');
        assert_eq!(s.comment_marker, '#');
        assert_eq!(s.sample_lookahead, 10_000);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_rejects_unusable_markers() {
        assert!(DelimitedSettings::new('§').validate().is_err());
        assert!(DelimitedSettings::new('\n').validate().is_err());
        assert!(DelimitedSettings::new('#').validate().is_err());
        assert!(
            DelimitedSettings::new(',')
                .with_sample_lookahead(0)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_bytes_only_for_ascii() {
        assert_eq!(DelimitedSettings::new(',').delimiter_byte(), Ok(b','));
        assert_eq!(DelimitedSettings::default().comment_byte(), Ok(b'#'));
        assert!(DelimitedSettings::new('§').delimiter_byte().is_err());
        assert!(DelimitedSettings::new('é').delimiter_byte().is_err());
    }
}
