use crate::error::SettingsError;
use connectors::file::delimited::settings::DelimitedSettings;
use model::schema::table::CollisionPolicy;
use planner::statements::QuoteStyle;
use serde::{Deserialize, Serialize};

pub const DEFAULT_FLUSH_THRESHOLD: usize = 100_000;
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1_000_000;

/// Immutable, validated configuration of a load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestSettings {
    /// Rows queued before a batch is executed.
    pub flush_threshold: usize,
    pub source: DelimitedSettings,
    pub collision_policy: CollisionPolicy,
    pub quote_style: QuoteStyle,
    /// Inserted rows between two progress log lines.
    pub progress_interval: u64,
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            flush_threshold: DEFAULT_FLUSH_THRESHOLD,
            source: DelimitedSettings::default(),
            collision_policy: CollisionPolicy::default(),
            quote_style: QuoteStyle::default(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

impl IngestSettings {
    pub fn builder() -> IngestSettingsBuilder {
        IngestSettingsBuilder::new()
    }

    pub fn from_builder(builder: IngestSettingsBuilder) -> Result<Self, SettingsError> {
        let settings = Self {
            flush_threshold: builder.flush_threshold.unwrap_or(DEFAULT_FLUSH_THRESHOLD),
            source: builder.source.unwrap_or_default(),
            collision_policy: builder.collision_policy.unwrap_or_default(),
            quote_style: builder.quote_style.unwrap_or_default(),
            progress_interval: builder
                .progress_interval
                .unwrap_or(DEFAULT_PROGRESS_INTERVAL),
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.flush_threshold == 0 {
            return Err(SettingsError::ZeroFlushThreshold);
        }
        if self.progress_interval == 0 {
            return Err(SettingsError::ZeroProgressInterval);
        }
        self.source.validate().map_err(SettingsError::InvalidSource)
    }

    pub fn flush_threshold(&self) -> usize {
        self.flush_threshold
    }

    pub fn source(&self) -> &DelimitedSettings {
        &self.source
    }

    pub fn delimiter(&self) -> char {
        self.source.delimiter
    }

    pub fn collision_policy(&self) -> CollisionPolicy {
        self.collision_policy
    }

    pub fn quote_style(&self) -> QuoteStyle {
        self.quote_style
    }

    pub fn progress_interval(&self) -> u64 {
        self.progress_interval
    }
}

#[derive(Debug, Default)]
pub struct IngestSettingsBuilder {
    pub flush_threshold: Option<usize>,
    pub source: Option<DelimitedSettings>,
    pub collision_policy: Option<CollisionPolicy>,
    pub quote_style: Option<QuoteStyle>,
    pub progress_interval: Option<u64>,
}

impl IngestSettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flush_threshold(mut self, rows: usize) -> Self {
        self.flush_threshold = Some(rows);
        self
    }

    pub fn source(mut self, source: DelimitedSettings) -> Self {
        self.source = Some(source);
        self
    }

    /// Shorthand that keeps the other source settings at their current values.
    pub fn delimiter(mut self, delimiter: char) -> Self {
        let source = self.source.unwrap_or_default();
        self.source = Some(DelimitedSettings {
            delimiter,
            ..source
        });
        self
    }

    pub fn comment_marker(mut self, marker: char) -> Self {
        let source = self.source.unwrap_or_default();
        self.source = Some(source.with_comment_marker(marker));
        self
    }

    pub fn collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = Some(policy);
        self
    }

    pub fn quote_style(mut self, style: QuoteStyle) -> Self {
        self.quote_style = Some(style);
        self
    }

    pub fn progress_interval(mut self, rows: u64) -> Self {
        self.progress_interval = Some(rows);
        self
    }

    pub fn build(self) -> Result<IngestSettings, SettingsError> {
        IngestSettings::from_builder(self)
    }
}
