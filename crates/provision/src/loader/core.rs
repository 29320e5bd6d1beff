//! Core [`SpecLoader`] struct: filesystem-backed spec loading.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::schema::{ScheduleSpec, SpecDocument, SpecEnvelope};

use super::error::{LoadError, LoadResult, LoadStatus, Result};

/// Filesystem-backed spec loader.
///
/// Scans a directory (recursively) for `*.yml` / `*.yaml` files,
/// deserializes them into [`SpecDocument`] instances via two-pass
/// deserialization, and keeps an in-memory map keyed by spec id. The map
/// is ordered so that batch runs see specs in a stable order regardless
/// of filesystem enumeration.
pub struct SpecLoader {
    /// Root directory containing spec YAML files.
    specs_dir: PathBuf,
    /// In-memory store of all documents keyed by `metadata.id`.
    documents: BTreeMap<String, SpecDocument>,
}

impl SpecLoader {
    /// Create a new loader for the given directory.
    pub fn new(specs_dir: PathBuf) -> Self {
        Self {
            specs_dir,
            documents: BTreeMap::new(),
        }
    }

    /// Recursively scan the specs directory and load all YAML files.
    ///
    /// Dotfiles (filenames starting with `.`) and non-YAML files are skipped.
    /// Subdirectories are scanned recursively.
    /// Parse errors are reported per-file but do not abort the scan.
    pub fn load_all(&mut self) -> Result<Vec<LoadResult>> {
        let mut results = Vec::new();
        let dir = self.specs_dir.clone();
        self.scan_dir_recursive(&dir, &mut results)?;
        Ok(results)
    }

    fn scan_dir_recursive(&mut self, dir: &Path, results: &mut Vec<LoadResult>) -> Result<()> {
        let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
            .collect::<std::io::Result<Vec<_>>>()?
            .into_iter()
            .map(|e| e.path())
            .collect();
        // Deterministic scan order across platforms.
        entries.sort();

        for path in entries {
            // Skip dotfiles/dotdirs
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with('.') {
                    if path.is_file() {
                        results.push(LoadResult {
                            path,
                            status: LoadStatus::Skipped {
                                reason: "dotfile".to_string(),
                            },
                        });
                    }
                    continue;
                }
            }

            // Recurse into subdirectories
            if path.is_dir() {
                self.scan_dir_recursive(&path, results)?;
                continue;
            }

            // Skip non-YAML extensions
            let is_yaml = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e == "yml" || e == "yaml")
                .unwrap_or(false);

            if !is_yaml {
                results.push(LoadResult {
                    path,
                    status: LoadStatus::Skipped {
                        reason: "not a YAML file".to_string(),
                    },
                });
                continue;
            }

            match self.load_file(&path) {
                Ok(doc) => {
                    let spec_id = doc.metadata().id.clone();
                    if self.documents.contains_key(&spec_id) {
                        warn!(spec_id = %spec_id, path = %path.display(), "duplicate spec id");
                        results.push(LoadResult {
                            path,
                            status: LoadStatus::Failed {
                                error: format!("duplicate spec id '{}'", spec_id),
                            },
                        });
                        continue;
                    }
                    info!(spec_id = %spec_id, kind = %doc.kind(), path = %path.display(), "loaded spec");
                    self.documents.insert(spec_id.clone(), doc);
                    results.push(LoadResult {
                        path,
                        status: LoadStatus::Loaded { spec_id },
                    });
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to load spec file");
                    results.push(LoadResult {
                        path,
                        status: LoadStatus::Failed {
                            error: e.to_string(),
                        },
                    });
                }
            }
        }

        Ok(())
    }

    /// Parse a single YAML file into a [`SpecDocument`] via two-pass
    /// deserialization.
    ///
    /// First pass: deserialize as [`SpecEnvelope`] to read the `kind` field.
    /// Second pass: reconstruct and deserialize into the kind-specific type.
    pub fn load_file(&self, path: &Path) -> Result<SpecDocument> {
        let contents = fs::read_to_string(path)?;

        let envelope: SpecEnvelope = serde_yaml::from_str(&contents)?;

        if envelope.metadata.id.is_empty() {
            return Err(LoadError::Validation(
                "spec metadata.id must not be empty".to_string(),
            ));
        }

        envelope.parse_full().map_err(|e| {
            LoadError::Validation(format!(
                "failed to parse spec '{}': {}",
                envelope.metadata.id, e
            ))
        })
    }

    /// Get the specs directory path.
    pub fn specs_dir(&self) -> &Path {
        &self.specs_dir
    }

    /// All loaded documents keyed by spec id.
    pub fn documents(&self) -> &BTreeMap<String, SpecDocument> {
        &self.documents
    }

    /// The loaded schedule specs, in id order.
    pub fn schedule_specs(&self) -> Vec<ScheduleSpec> {
        self.documents
            .values()
            .filter_map(|doc| doc.as_schedule().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    fn spec_yaml(id: &str, purpose: &str) -> String {
        format!(
            r#"
apiVersion: v1
kind: ScheduleSpec
metadata:
  id: {id}
  name: Spec {id}
schedule:
  localTime: "08:50"
  utcOffset: -3
target:
  functionName: report-generator
  functionArn: arn:aws:lambda:sa-east-1:123456789012:function:report-generator
purpose: {purpose}
"#
        )
    }

    fn loaded_count(results: &[LoadResult]) -> usize {
        results
            .iter()
            .filter(|r| matches!(r.status, LoadStatus::Loaded { .. }))
            .count()
    }

    #[test]
    fn loads_yaml_files_and_skips_the_rest() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "a.yml", &spec_yaml("a", "daily-report"));
        write(tmp.path(), "b.yaml", &spec_yaml("b", "metrics"));
        write(tmp.path(), "notes.txt", "not yaml");
        write(tmp.path(), ".hidden.yml", &spec_yaml("hidden", "hidden"));

        let mut loader = SpecLoader::new(tmp.path().to_path_buf());
        let results = loader.load_all().unwrap();

        assert_eq!(loaded_count(&results), 2);
        assert_eq!(loader.documents().len(), 2);
        assert_eq!(
            results
                .iter()
                .filter(|r| matches!(r.status, LoadStatus::Skipped { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn recurses_into_subdirectories() {
        let tmp = tempfile::tempdir().unwrap();
        let sub = tmp.path().join("nested");
        fs::create_dir(&sub).unwrap();
        write(&sub, "a.yml", &spec_yaml("a", "daily-report"));

        let mut loader = SpecLoader::new(tmp.path().to_path_buf());
        let results = loader.load_all().unwrap();
        assert_eq!(loaded_count(&results), 1);
    }

    #[test]
    fn reports_parse_failures_without_aborting() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "bad.yml", "kind: [unclosed");
        write(tmp.path(), "good.yml", &spec_yaml("good", "daily-report"));

        let mut loader = SpecLoader::new(tmp.path().to_path_buf());
        let results = loader.load_all().unwrap();

        assert_eq!(loaded_count(&results), 1);
        assert!(results
            .iter()
            .any(|r| matches!(r.status, LoadStatus::Failed { .. })));
    }

    #[test]
    fn duplicate_ids_fail_the_second_file() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "a.yml", &spec_yaml("same", "daily-report"));
        write(tmp.path(), "b.yml", &spec_yaml("same", "metrics"));

        let mut loader = SpecLoader::new(tmp.path().to_path_buf());
        let results = loader.load_all().unwrap();

        assert_eq!(loaded_count(&results), 1);
        let failed: Vec<_> = results
            .iter()
            .filter_map(|r| match &r.status {
                LoadStatus::Failed { error } => Some(error.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(failed.len(), 1);
        assert!(failed[0].contains("duplicate spec id"));
    }

    #[test]
    fn unknown_kind_is_a_validation_error() {
        let tmp = tempfile::tempdir().unwrap();
        let yaml = spec_yaml("a", "daily-report").replace("kind: ScheduleSpec", "kind: Mystery");
        write(tmp.path(), "a.yml", &yaml);

        let loader = SpecLoader::new(tmp.path().to_path_buf());
        let err = loader.load_file(&tmp.path().join("a.yml")).unwrap_err();
        assert!(matches!(err, LoadError::Validation(_)));
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let mut loader = SpecLoader::new(PathBuf::from("/nonexistent/specs"));
        assert!(matches!(loader.load_all(), Err(LoadError::Io(_))));
    }

    #[test]
    fn schedule_specs_come_back_in_id_order() {
        let tmp = tempfile::tempdir().unwrap();
        write(tmp.path(), "z.yml", &spec_yaml("zulu", "zulu-report"));
        write(tmp.path(), "a.yml", &spec_yaml("alpha", "alpha-report"));

        let mut loader = SpecLoader::new(tmp.path().to_path_buf());
        loader.load_all().unwrap();
        let ids: Vec<String> = loader
            .schedule_specs()
            .iter()
            .map(|s| s.metadata.id.clone())
            .collect();
        assert_eq!(ids, vec!["alpha", "zulu"]);
    }
}
