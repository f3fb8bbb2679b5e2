use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Storage type inferred for a column from its sample cell.
///
/// The declared types are affinity hints for the backing store, not hard
/// constraints: every cell is still bound as text at insert time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnType {
    #[default]
    Text,
    Integer,
    Real,
}

impl ColumnType {
    /// Infers the narrowest type the cell fits.
    ///
    /// Attempts run TEXT -> REAL -> INTEGER and each one only runs when the
    /// previous one succeeded, so `"42"` is INTEGER, `"42.5"` is REAL and
    /// `"42abc"` stays TEXT. Non-finite spellings such as `inf` or `NaN` stay TEXT.
    pub fn infer(cell: &str) -> Self {
        let mut inferred = ColumnType::Text;
        if cell.parse::<f64>().is_ok_and(f64::is_finite) {
            inferred = ColumnType::Real;
            if cell.parse::<i64>().is_ok() {
                inferred = ColumnType::Integer;
            }
        }
        inferred
    }

    pub fn sql_name(&self) -> &'static str {
        match self {
            ColumnType::Text => "TEXT",
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sql_name())
    }
}

impl FromStr for ColumnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TEXT" => Ok(ColumnType::Text),
            "INTEGER" => Ok(ColumnType::Integer),
            "REAL" => Ok(ColumnType::Real),
            other => Err(format!("Unknown column type: {other}")),
        }
    }
}
