use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf, str::FromStr};

pub const DEFAULT_DB_PATH: &str = "mydb.sqlite";
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 35_000;

/// `journal_mode` pragma.
///
/// `Memory` is the default: no journal file is written, yet a failed batch
/// still rolls back. Under `Off` a rollback leaves the table undefined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalMode {
    Off,
    Delete,
    Wal,
    #[default]
    Memory,
}

impl JournalMode {
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Delete => "delete",
            Self::Wal => "wal",
            Self::Memory => "memory",
        }
    }
}

/// `synchronous` pragma. Bulk loads default to `Off`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    #[default]
    Off,
    Normal,
    Full,
}

impl SyncMode {
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Normal => "normal",
            Self::Full => "full",
        }
    }
}

macro_rules! pragma_enum_text {
    ($ty:ident { $($variant:ident),+ }) => {
        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let lower = s.to_lowercase();
                $(
                    if lower == $ty::$variant.pragma_value() {
                        return Ok($ty::$variant);
                    }
                )+
                Err(format!("Unknown {} value: {s}", stringify!($ty)))
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.pragma_value())
            }
        }
    };
}

pragma_enum_text!(JournalMode { Off, Delete, Wal, Memory });
pragma_enum_text!(SyncMode { Off, Normal, Full });

/// Connection settings for the SQLite backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SqliteSettings {
    pub path: PathBuf,
    /// How long a statement waits on a locked database, in milliseconds.
    pub busy_timeout_ms: u64,
    pub synchronous: SyncMode,
    pub journal_mode: JournalMode,
}

impl Default for SqliteSettings {
    fn default() -> Self {
        SqliteSettings {
            path: PathBuf::from(DEFAULT_DB_PATH),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            synchronous: SyncMode::default(),
            journal_mode: JournalMode::default(),
        }
    }
}

impl SqliteSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SqliteSettings {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_busy_timeout_ms(mut self, ms: u64) -> Self {
        self.busy_timeout_ms = ms;
        self
    }

    pub fn with_synchronous(mut self, mode: SyncMode) -> Self {
        self.synchronous = mode;
        self
    }

    pub fn with_journal_mode(mut self, mode: JournalMode) -> Self {
        self.journal_mode = mode;
        self
    }
}
