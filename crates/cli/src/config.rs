use crate::{
    commands::GlobalArgs,
    env::{ENV_BUSY_TIMEOUT_MS, ENV_DB, ENV_DELIMITER, ENV_FLUSH_THRESHOLD, EnvManager},
    error::CliError,
};
use connectors::sql::sqlite::settings::SqliteSettings;
use engine_core::settings::{IngestSettings, IngestSettingsBuilder};
use std::path::PathBuf;

/// Everything a command needs, merged as flag > environment > default.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub ingest: IngestSettings,
    pub sqlite: SqliteSettings,
}

impl ResolvedConfig {
    pub fn resolve(args: &GlobalArgs, env: &EnvManager) -> Result<Self, CliError> {
        let mut builder = IngestSettingsBuilder::new();

        let delimiter = match &args.delimiter {
            Some(raw) => Some(parse_delimiter(raw)?),
            None => env.get(ENV_DELIMITER).map(parse_delimiter).transpose()?,
        };
        if let Some(delimiter) = delimiter {
            builder = builder.delimiter(delimiter);
        }
        if let Some(marker) = args.comment {
            builder = builder.comment_marker(marker);
        }

        let flush_threshold = match args.flush_threshold {
            Some(rows) => Some(rows),
            None => env.get_parsed::<usize>(ENV_FLUSH_THRESHOLD)?,
        };
        if let Some(rows) = flush_threshold {
            builder = builder.flush_threshold(rows);
        }
        if let Some(policy) = args.on_collision {
            builder = builder.collision_policy(policy);
        }
        if let Some(style) = args.quote_style {
            builder = builder.quote_style(style);
        }
        let ingest = builder.build()?;

        let path = match &args.db {
            Some(path) => Some(path.clone()),
            None => env.get(ENV_DB).map(PathBuf::from),
        };
        let mut sqlite = path.map(SqliteSettings::new).unwrap_or_default();

        let busy_timeout_ms = match args.busy_timeout_ms {
            Some(ms) => Some(ms),
            None => env.get_parsed::<u64>(ENV_BUSY_TIMEOUT_MS)?,
        };
        if let Some(ms) = busy_timeout_ms {
            sqlite = sqlite.with_busy_timeout_ms(ms);
        }
        if let Some(mode) = args.journal_mode {
            sqlite = sqlite.with_journal_mode(mode);
        }
        if let Some(mode) = args.synchronous {
            sqlite = sqlite.with_synchronous(mode);
        }

        Ok(ResolvedConfig { ingest, sqlite })
    }
}

/// Accepts a single character, or `\t` / `tab` spelled out.
pub fn parse_delimiter(raw: &str) -> Result<char, CliError> {
    if raw == "\\t" || raw.eq_ignore_ascii_case("tab") {
        return Ok('\t');
    }
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(CliError::Config(format!(
            "Delimiter must be a single character, got {raw:?}"
        ))),
    }
}
