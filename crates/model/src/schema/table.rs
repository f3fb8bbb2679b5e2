use crate::{
    core::{data_type::ColumnType, identifiers::Identifier},
    schema::error::SchemaError,
};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt, str::FromStr};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: Identifier,
    pub data_type: ColumnType,
    /// Zero-based position in the source header.
    pub ordinal: usize,
    /// Header text before sanitization.
    pub raw_name: String,
}

/// Ordered column list plus the target table, derived once from a header line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub table: Identifier,
    pub columns: Vec<ColumnSpec>,
}

/// What to do when sanitized column names are empty or collide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Fail before any DDL is issued.
    #[default]
    Reject,
    /// Rename: empty names become `col_<n>`, repeats get `_2`, `_3`, ...
    Suffix,
}

impl FromStr for CollisionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(CollisionPolicy::Reject),
            "suffix" => Ok(CollisionPolicy::Suffix),
            other => Err(format!("Unknown collision policy: {other}")),
        }
    }
}

impl fmt::Display for CollisionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionPolicy::Reject => f.write_str("reject"),
            CollisionPolicy::Suffix => f.write_str("suffix"),
        }
    }
}

/// Sanitizes a table-name hint; unlike column names it may never end up empty.
pub fn table_identifier(raw: &str) -> Result<Identifier, SchemaError> {
    let table = Identifier::sanitize(raw);
    if table.is_empty() {
        return Err(SchemaError::EmptyTableName {
            raw: raw.to_string(),
        });
    }
    Ok(table)
}

impl TableSchema {
    pub fn new(table: Identifier, columns: Vec<ColumnSpec>) -> Self {
        TableSchema { table, columns }
    }

    /// Number of cells every data line must have.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &Identifier> {
        self.columns.iter().map(|c| &c.name)
    }

    /// Applies `policy` to empty or duplicate column names.
    pub fn resolve(self, policy: CollisionPolicy) -> Result<TableSchema, SchemaError> {
        if self.columns.is_empty() {
            return Err(SchemaError::NoColumns);
        }

        match policy {
            CollisionPolicy::Reject => self.reject_collisions(),
            CollisionPolicy::Suffix => Ok(self.suffix_collisions()),
        }
    }

    fn reject_collisions(self) -> Result<TableSchema, SchemaError> {
        for (i, col) in self.columns.iter().enumerate() {
            if col.name.is_empty() {
                return Err(SchemaError::EmptyColumnName {
                    ordinal: col.ordinal,
                    raw: col.raw_name.clone(),
                });
            }
            if let Some(first) = self.columns[..i].iter().find(|c| c.name == col.name) {
                return Err(SchemaError::DuplicateColumn {
                    name: col.name.to_string(),
                    first: first.ordinal,
                    first_raw: first.raw_name.clone(),
                    second: col.ordinal,
                    second_raw: col.raw_name.clone(),
                });
            }
        }
        Ok(self)
    }

    fn suffix_collisions(mut self) -> TableSchema {
        // Names taken verbatim from the header win over generated ones.
        let mut taken: HashSet<Identifier> = HashSet::new();
        let mut seen: HashSet<Identifier> = HashSet::new();
        let mut needs_rename = vec![false; self.columns.len()];

        for (i, col) in self.columns.iter().enumerate() {
            if col.name.is_empty() || !seen.insert(col.name.clone()) {
                needs_rename[i] = true;
            } else {
                taken.insert(col.name.clone());
            }
        }

        for (col, rename) in self.columns.iter_mut().zip(needs_rename) {
            if !rename {
                continue;
            }
            let base = if col.name.is_empty() {
                Identifier::positional(col.ordinal)
            } else {
                col.name.clone()
            };
            let mut candidate = base.clone();
            let mut n = 2;
            while taken.contains(&candidate) {
                candidate = base.with_suffix(n);
                n += 1;
            }
            taken.insert(candidate.clone());
            col.name = candidate;
        }

        self
    }
}
