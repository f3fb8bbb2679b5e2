use crate::{
    error::IngestionError, metrics::Metrics, report::IngestReport, settings::IngestSettings,
};
use connectors::{
    file::delimited::source::DelimitedReader,
    sql::base::{adapter::StorageBackend, batch::BatchStatement, error::DbError},
};
use model::{core::identifiers::Identifier, schema::table::table_identifier};
use planner::statements::build_statements;
use std::{io::Read, path::Path, time::Instant};
use tracing::{debug, info, warn};

/// Loads `source` into the table named after `table_hint`.
pub fn ingest<R, B>(
    backend: &mut B,
    source: R,
    table_hint: &str,
    settings: &IngestSettings,
) -> Result<IngestReport, IngestionError>
where
    R: Read,
    B: StorageBackend,
{
    settings.validate()?;
    let reader = DelimitedReader::new(source, *settings.source())?.named(table_hint);
    Loader::new(settings).run(backend, reader, table_hint)
}

/// Opens `path` and loads it. A missing or unreadable file fails before any DDL.
pub fn ingest_file<B: StorageBackend>(
    backend: &mut B,
    path: impl AsRef<Path>,
    table_hint: &str,
    settings: &IngestSettings,
) -> Result<IngestReport, IngestionError> {
    settings.validate()?;
    let reader = DelimitedReader::from_path(path, *settings.source())?;
    Loader::new(settings).run(backend, reader, table_hint)
}

/// Streams rows from a [`DelimitedReader`] into a [`StorageBackend`],
/// flushing every `flush_threshold` rows and once more at end of input.
pub struct Loader<'s> {
    settings: &'s IngestSettings,
    metrics: Metrics,
}

impl<'s> Loader<'s> {
    pub fn new(settings: &'s IngestSettings) -> Self {
        Loader {
            settings,
            metrics: Metrics::new(),
        }
    }

    /// Reports into `metrics` instead of a private set of counters.
    pub fn with_metrics(mut self, metrics: Metrics) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Settings are validated first; a deserialized [`IngestSettings`] may not be.
    pub fn run<R, B>(
        &self,
        backend: &mut B,
        mut reader: DelimitedReader<R>,
        table_hint: &str,
    ) -> Result<IngestReport, IngestionError>
    where
        R: Read,
        B: StorageBackend,
    {
        self.settings.validate()?;
        let started = Instant::now();
        let table = table_identifier(table_hint)?;
        let schema = reader
            .read_schema(table.clone())?
            .resolve(self.settings.collision_policy())?;
        let statements = build_statements(&schema, self.settings.quote_style());

        info!(
            "Loading {} into '{}' ({} columns) on {}",
            reader.name(),
            table,
            schema.num_columns(),
            backend.kind()
        );
        info!("DDL: {}", statements.create);
        info!("DML: {}", statements.insert);

        let table_existed = match backend.execute(&statements.create) {
            Ok(_) => false,
            Err(err) if err.is_already_exists() => {
                warn!(
                    "Table '{}' already exists; appending without checking its columns",
                    table
                );
                true
            }
            Err(source) => {
                return Err(IngestionError::CreateTable {
                    table: table.to_string(),
                    source,
                });
            }
        };

        let mut batch = backend
            .prepare_batch(&statements.insert)
            .map_err(|source| IngestionError::Prepare {
                table: table.to_string(),
                source,
            })?;

        let delimiter = self.settings.delimiter();
        let num_columns = schema.num_columns();
        let threshold = self.settings.flush_threshold();

        while let Some(row) = reader.next_row()? {
            self.metrics.increment_lines(1);

            if row.is_blank(delimiter) {
                self.metrics.increment_blank(1);
                continue;
            }
            if row.len() != num_columns {
                self.metrics.increment_mismatched(1);
                warn!(
                    "Skipping line {} of {}: expected {} cells, found {}",
                    row.line,
                    reader.name(),
                    num_columns,
                    row.len()
                );
                continue;
            }

            batch.add_to_batch(row.into_cells())?;
            self.metrics.increment_queued(1);

            if batch.pending() >= threshold {
                self.flush(&mut batch, &table)?;
            }
        }

        if batch.pending() > 0 {
            self.flush(&mut batch, &table)?;
        }
        batch.close()?;

        let counters = self.metrics.snapshot();
        if counters.mismatched_rows > 0 {
            warn!(
                "{} lines of {} had the wrong number of cells and were skipped",
                counters.mismatched_rows,
                reader.name()
            );
        }
        info!(
            "Loaded '{}': {} lines read, {} rows inserted in {} batches",
            table, counters.lines_read, counters.rows_inserted, counters.batches_executed
        );

        Ok(IngestReport {
            source: reader.name().to_string(),
            table: table.to_string(),
            schema,
            create_sql: statements.create,
            insert_sql: statements.insert,
            table_existed,
            counters,
            took_ms: started.elapsed().as_millis() as u64,
        })
    }

    fn flush<S: BatchStatement>(&self, batch: &mut S, table: &Identifier) -> Result<(), IngestionError> {
        let size = batch.pending();
        let before = self.metrics.rows_inserted();

        let inserted = batch.execute_batch().map_err(|source| self.batch_failed(source))?;
        batch.clear_batch();
        self.metrics.record_flush(inserted as u64);

        let after = self.metrics.rows_inserted();
        debug!(
            "Flushed {} rows into '{}' ({} total)",
            size, table, after
        );

        let interval = self.settings.progress_interval();
        if after / interval > before / interval {
            info!("'{}': {} rows inserted so far", table, after);
        }
        Ok(())
    }

    fn batch_failed(&self, source: DbError) -> IngestionError {
        let counters = self.metrics.snapshot();
        IngestionError::BatchExecution {
            batch: counters.batches_executed + 1,
            counters,
            source,
        }
    }
}
