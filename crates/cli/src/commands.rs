use clap::{Args, Subcommand};
use connectors::sql::sqlite::settings::{JournalMode, SyncMode};
use model::schema::table::CollisionPolicy;
use planner::statements::QuoteStyle;
use std::path::PathBuf;

/// Options shared by every subcommand. Unset flags fall back to the
/// environment, then to built-in defaults.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    #[arg(long, global = true, help = "SQLite database file [env: TSV2SQL_DB]")]
    pub db: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Field delimiter; `\\t` or `tab` for a tab [env: TSV2SQL_DELIMITER]"
    )]
    pub delimiter: Option<String>,

    #[arg(long, global = true, help = "Comment marker character")]
    pub comment: Option<char>,

    #[arg(
        long,
        global = true,
        help = "Rows per batch [env: TSV2SQL_FLUSH_THRESHOLD]"
    )]
    pub flush_threshold: Option<usize>,

    #[arg(long, global = true, help = "Policy for empty or duplicate column names")]
    pub on_collision: Option<CollisionPolicy>,

    #[arg(long, global = true, help = "Identifier quoting in generated SQL")]
    pub quote_style: Option<QuoteStyle>,

    #[arg(
        long,
        global = true,
        help = "Lock wait in milliseconds [env: TSV2SQL_BUSY_TIMEOUT_MS]"
    )]
    pub busy_timeout_ms: Option<u64>,

    #[arg(long, global = true, help = "SQLite journal_mode pragma")]
    pub journal_mode: Option<JournalMode>,

    #[arg(long, global = true, help = "SQLite synchronous pragma")]
    pub synchronous: Option<SyncMode>,

    #[arg(long, global = true, help = "Read KEY=VALUE settings from this file")]
    pub env_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load one delimited file into a table
    Load {
        #[arg(long, help = "Table name; sanitized before use")]
        table: String,

        #[arg(long, help = "Source file path")]
        file: PathBuf,

        #[arg(
            long,
            help = "If specified, writes the JSON report to this file instead of stdout"
        )]
        output: Option<PathBuf>,
    },
    /// Load every matching file of a directory, one table per file
    Scan {
        #[arg(long, default_value = ".", help = "Directory to scan")]
        dir: PathBuf,

        #[arg(long, default_value = "tsv", help = "File extension, case-insensitive")]
        extension: String,

        #[arg(long, help = "Continue with the next file after a failed load")]
        keep_going: bool,

        #[arg(
            long,
            help = "If specified, writes the JSON report to this file instead of stdout"
        )]
        output: Option<PathBuf>,
    },
    /// Print a table's columns and row count as JSON
    Info {
        #[arg(long, help = "Table name")]
        table: String,
    },
}
