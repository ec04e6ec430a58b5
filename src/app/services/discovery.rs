//! File discovery by mask
//!
//! Lists the files of an input directory whose names match a glob mask. The
//! search is not recursive and results are sorted by file name.

use glob::Pattern;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::app::models::FileDefinition;
use crate::error::{Result, RipperError};

/// Find files directly inside `directory` whose names match `mask`
pub fn discover_files(directory: &Path, mask: &str) -> Result<Vec<PathBuf>> {
    let pattern = Pattern::new(mask)
        .map_err(|e| RipperError::discovery(format!("Invalid file mask '{}': {}", mask, e)))?;

    if !directory.is_dir() {
        return Err(RipperError::discovery(format!(
            "Input directory not found: {}",
            directory.display()
        )));
    }

    debug!("Searching {} for '{}'", directory.display(), mask);

    let mut files = Vec::new();
    for entry in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            RipperError::discovery(format!("Failed to read {}: {}", directory.display(), e))
        })?;

        if entry.file_type().is_file() && pattern.matches(&entry.file_name().to_string_lossy()) {
            files.push(entry.into_path());
        }
    }

    debug!("Found {} files matching '{}'", files.len(), mask);
    Ok(files)
}

/// Find the files a definition's input directory and mask select
pub fn discover_for_definition(definition: &FileDefinition) -> Result<Vec<PathBuf>> {
    match (&definition.input_directory, &definition.file_mask) {
        (Some(directory), Some(mask)) => discover_files(directory, mask),
        _ => Err(RipperError::configuration(
            "File discovery requires inputDirectory and fileMask",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "").unwrap();
    }

    #[test]
    fn test_discover_matching_files() {
        let temp_dir = TempDir::new().unwrap();
        touch(temp_dir.path(), "Valid-Delimited-2.txt");
        touch(temp_dir.path(), "Valid-Delimited-1.txt");
        touch(temp_dir.path(), "Valid-Fixed-1.txt");
        touch(temp_dir.path(), "notes.md");

        let files = discover_files(temp_dir.path(), "Valid-Delimited-*.txt").unwrap();

        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["Valid-Delimited-1.txt", "Valid-Delimited-2.txt"]);
    }

    #[test]
    fn test_discovery_is_not_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested");
        fs::create_dir_all(&nested).unwrap();
        touch(&nested, "people.txt");
        touch(temp_dir.path(), "people.txt");

        let files = discover_files(temp_dir.path(), "*.txt").unwrap();

        assert_eq!(files, vec![temp_dir.path().join("people.txt")]);
    }

    #[test]
    fn test_missing_directory() {
        let temp_dir = TempDir::new().unwrap();

        let err = discover_files(&temp_dir.path().join("missing"), "*.txt").unwrap_err();

        assert!(matches!(err, RipperError::Discovery { .. }));
    }

    #[test]
    fn test_invalid_mask() {
        let temp_dir = TempDir::new().unwrap();

        let err = discover_files(temp_dir.path(), "[unclosed").unwrap_err();

        assert!(err.to_string().contains("Invalid file mask"));
    }

    #[test]
    fn test_definition_without_location() {
        let definition = FileDefinition::delimited(",");

        assert!(matches!(
            discover_for_definition(&definition),
            Err(RipperError::Configuration { .. })
        ));
    }
}
