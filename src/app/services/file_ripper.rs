//! File ripping facade
//!
//! Owns the I/O around the parsing engine: reads files, applies output
//! renames and the error policy, and rips every file a definition's mask
//! selects, one after another or on a bounded pool of blocking tasks.

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use super::discovery::discover_for_definition;
use super::record_parser::{RecordParsingService, RipResult};
use crate::app::models::FileDefinition;
use crate::config::RipperConfig;
use crate::error::{Result, RipperError};

/// Records ripped from one file
#[derive(Debug, Clone)]
pub struct FileRipResult {
    pub path: PathBuf,
    pub result: RipResult,
}

/// Reads files and turns them into records according to a file definition
#[derive(Debug, Clone, Default)]
pub struct FileRipper {
    config: RipperConfig,
}

impl FileRipper {
    pub fn new(config: RipperConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RipperConfig {
        &self.config
    }

    /// Rip content already held in memory
    pub fn rip_str(&self, definition: &FileDefinition, content: &str) -> Result<RipResult> {
        let service = RecordParsingService::new(definition)?;
        let renames = &self.config.renames;
        renames.check_one_to_one(definition.field_names())?;

        let records = service
            .parse_str(content)
            .map(|result| result.map(|record| renames.apply(record)));

        RipResult::collect(records, self.config.error_policy)
    }

    /// Read and rip a single file
    pub fn rip_file(&self, definition: &FileDefinition, path: &Path) -> Result<RipResult> {
        info!("Ripping {} file: {}", definition.file_type, path.display());

        let content = std::fs::read_to_string(path).map_err(|e| RipperError::io(path, e))?;
        let result = self.rip_str(definition, &content)?;

        info!(
            "Parsed {} records from {}",
            result.stats.records_parsed,
            path.display()
        );
        if result.stats.records_skipped > 0 {
            warn!(
                "{} records skipped in {}",
                result.stats.records_skipped,
                path.display()
            );
        }

        Ok(result)
    }

    /// Read a file and convert every record into `T`
    ///
    /// Conversion errors are tagged with the 1-based ordinal of the record
    /// among the parsed records.
    pub fn rip_file_as<T: DeserializeOwned>(
        &self,
        definition: &FileDefinition,
        path: &Path,
    ) -> Result<Vec<T>> {
        let result = self.rip_file(definition, path)?;

        result
            .records
            .iter()
            .enumerate()
            .map(|(index, record)| record.deserialize_into(index + 1))
            .collect()
    }

    /// Rip the given files in order
    pub fn rip_paths(
        &self,
        definition: &FileDefinition,
        paths: &[PathBuf],
    ) -> Result<Vec<FileRipResult>> {
        RecordParsingService::new(definition)?;

        paths
            .iter()
            .map(|path| {
                Ok(FileRipResult {
                    path: path.clone(),
                    result: self.rip_file(definition, path)?,
                })
            })
            .collect()
    }

    /// Rip every file the definition's input directory and mask select
    pub fn rip_files(&self, definition: &FileDefinition) -> Result<Vec<FileRipResult>> {
        RecordParsingService::new(definition)?;
        let paths = discover_for_definition(definition)?;
        self.rip_paths(definition, &paths)
    }

    /// Rip the given files concurrently, at most `workers` at a time
    ///
    /// Results come back in the order of `paths`.
    pub async fn rip_paths_parallel(
        &self,
        definition: Arc<FileDefinition>,
        paths: Vec<PathBuf>,
    ) -> Result<Vec<FileRipResult>> {
        RecordParsingService::new(&definition)?;

        let workers = self.config.workers.max(1);
        debug!("Ripping {} files with {} workers", paths.len(), workers);

        let semaphore = Arc::new(Semaphore::new(workers));
        let mut tasks = JoinSet::new();
        let file_count = paths.len();

        for (index, path) in paths.into_iter().enumerate() {
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| RipperError::TaskFailed {
                    message: e.to_string(),
                })?;
            let ripper = self.clone();
            let definition = Arc::clone(&definition);

            tasks.spawn_blocking(move || {
                let _permit = permit;
                let result = ripper.rip_file(&definition, &path);
                (index, path, result)
            });
        }

        let mut outputs = Vec::with_capacity(file_count);
        while let Some(joined) = tasks.join_next().await {
            let (index, path, result) = joined.map_err(|e| RipperError::TaskFailed {
                message: e.to_string(),
            })?;
            outputs.push((index, FileRipResult { path, result: result? }));
        }

        outputs.sort_by_key(|(index, _)| *index);
        Ok(outputs.into_iter().map(|(_, output)| output).collect())
    }

    /// Discover and rip every matching file concurrently
    pub async fn rip_files_parallel(
        &self,
        definition: Arc<FileDefinition>,
    ) -> Result<Vec<FileRipResult>> {
        RecordParsingService::new(&definition)?;
        let paths = discover_for_definition(&definition)?;
        self.rip_paths_parallel(definition, paths).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{FieldDefinition, FieldNameMap};
    use crate::app::services::record_parser::ErrorPolicy;

    fn definition() -> FileDefinition {
        FileDefinition::delimited("|")
            .with_header(true)
            .with_field(FieldDefinition::delimited("name", 0))
            .with_field(FieldDefinition::delimited("age", 1))
    }

    #[test]
    fn test_rip_str_applies_renames() {
        let ripper = FileRipper::new(
            RipperConfig::default().with_renames(FieldNameMap::new().with("name", "personName")),
        );

        let result = ripper.rip_str(&definition(), "name|age\nAaron|39\nGene|61").unwrap();

        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0].get("personName"), Some("Aaron"));
        assert_eq!(result.records[1].get("age"), Some("61"));
    }

    #[test]
    fn test_rip_str_error_policy() {
        let content = "name|age\nAaron|39\nbroken\nGene|61";

        let strict = FileRipper::default();
        assert_eq!(
            strict
                .rip_str(&definition(), content)
                .unwrap_err()
                .record_position(),
            Some(3)
        );

        let lenient =
            FileRipper::new(RipperConfig::default().with_error_policy(ErrorPolicy::Skip));
        let result = lenient.rip_str(&definition(), content).unwrap();
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.stats.records_skipped, 1);
    }

    #[test]
    fn test_colliding_renames_fail_before_parsing() {
        let ripper = FileRipper::new(
            RipperConfig::default().with_renames(FieldNameMap::new().with("name", "age")),
        );

        let err = ripper.rip_str(&definition(), "name|age\nAaron|39").unwrap_err();

        assert!(matches!(err, RipperError::Configuration { .. }));
    }

    #[test]
    fn test_rip_missing_file() {
        let err = FileRipper::default()
            .rip_file(&definition(), Path::new("/nonexistent/people.txt"))
            .unwrap_err();

        match err {
            RipperError::Io { path, .. } => assert_eq!(path, PathBuf::from("/nonexistent/people.txt")),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_definition_fails_before_reading() {
        let mut bad = definition();
        bad.delimiter = None;

        let err = FileRipper::default()
            .rip_paths(&bad, &[PathBuf::from("/nonexistent/people.txt")])
            .unwrap_err();

        assert!(matches!(err, RipperError::Configuration { .. }));
    }
}
