//! Schema -> SQL text for one ingestion run.
//!
//! The CREATE TABLE statement leaves identifiers bare while the INSERT
//! template back-ticks them. Databases built by earlier runs rely on that
//! shape, so [`QuoteStyle::Legacy`] keeps it; [`QuoteStyle::Consistent`]
//! quotes both statements.

use crate::query::{
    builder::{create_table::CreateTableBuilder, insert::InsertBuilder},
    dialect::{Dialect, Sqlite},
    renderer::{Render, Renderer},
};
use model::schema::table::TableSchema;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStyle {
    /// Bare identifiers in DDL, back-ticked identifiers in DML.
    #[default]
    Legacy,
    /// Back-ticked identifiers in both.
    Consistent,
}

impl FromStr for QuoteStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" => Ok(QuoteStyle::Legacy),
            "consistent" => Ok(QuoteStyle::Consistent),
            other => Err(format!("Unknown quote style: {other}")),
        }
    }
}

impl fmt::Display for QuoteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteStyle::Legacy => f.write_str("legacy"),
            QuoteStyle::Consistent => f.write_str("consistent"),
        }
    }
}

/// DDL and DML text generated from a single schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statements {
    pub create: String,
    pub insert: String,
}

pub fn build_create(schema: &TableSchema, style: QuoteStyle) -> String {
    build_create_with(&Sqlite, schema, style)
}

pub fn build_insert(schema: &TableSchema) -> String {
    build_insert_with(&Sqlite, schema)
}

pub fn build_statements(schema: &TableSchema, style: QuoteStyle) -> Statements {
    Statements {
        create: build_create(schema, style),
        insert: build_insert(schema),
    }
}

pub fn build_create_with(dialect: &dyn Dialect, schema: &TableSchema, style: QuoteStyle) -> String {
    let ast = CreateTableBuilder::from_schema(schema)
        .quoted(style == QuoteStyle::Consistent)
        .build();
    let mut renderer = Renderer::new(dialect);
    ast.render(&mut renderer);
    renderer.finish()
}

pub fn build_insert_with(dialect: &dyn Dialect, schema: &TableSchema) -> String {
    let ast = InsertBuilder::from_schema(schema).build();
    let mut renderer = Renderer::new(dialect);
    ast.render(&mut renderer);
    renderer.finish()
}
