//! Load and merge spec fragments from a directory
//!
//! Every `.json` or `.toml` file under the directory is a map of new id →
//! spec. Fragments are read in sorted path order and merged into one table.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use super::schema::NewEntitySpec;
use crate::core::config::DuplicatePolicy;
use crate::core::error::{GenerationError, Result};

/// One parsed fragment: new id → spec, in declaration order
pub type Fragment = IndexMap<String, NewEntitySpec>;

/// Merged specs plus the fragments that could not be used
#[derive(Debug, Default)]
pub struct SpecSet {
    pub specs: IndexMap<String, NewEntitySpec>,
    /// Fragment each spec came from
    pub sources: IndexMap<String, PathBuf>,
    /// Fragments skipped as `MalformedSpec`
    pub rejected: Vec<GenerationError>,
}

impl SpecSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&NewEntitySpec> {
        self.specs.get(id)
    }

    /// Union `fragment` into the set under `policy`
    pub fn merge_fragment(
        &mut self,
        path: &Path,
        fragment: Fragment,
        policy: DuplicatePolicy,
    ) -> Result<()> {
        for (id, spec) in fragment {
            if let Some(previous) = self.sources.get(&id) {
                match policy {
                    DuplicatePolicy::Reject => {
                        return Err(GenerationError::DuplicateEntityId {
                            id,
                            path: path.to_path_buf(),
                        });
                    }
                    DuplicatePolicy::LastWriteWins => {
                        tracing::warn!(
                            "Spec {} from {} overrides the one in {}",
                            id,
                            path.display(),
                            previous.display()
                        );
                    }
                }
            }
            self.sources.insert(id.clone(), path.to_path_buf());
            self.specs.insert(id, spec);
        }
        Ok(())
    }
}

/// Reads spec fragments from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecLoader {
    policy: DuplicatePolicy,
}

impl SpecLoader {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self { policy }
    }

    /// Parse one fragment file by extension
    pub fn load_fragment(path: &Path) -> Result<Fragment> {
        let malformed = |message: String| GenerationError::MalformedSpec {
            path: path.to_path_buf(),
            message,
        };

        let content = std::fs::read_to_string(path).map_err(|e| malformed(e.to_string()))?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content).map_err(|e| malformed(e.to_string())),
            Some("toml") => toml::from_str(&content).map_err(|e| malformed(e.to_string())),
            _ => Err(malformed("unsupported fragment extension".into())),
        }
    }

    /// Load and merge every fragment under `dir`
    ///
    /// Malformed fragments are logged and recorded in `SpecSet::rejected`;
    /// a duplicate id under `DuplicatePolicy::Reject` fails the whole load.
    pub fn load_directory(&self, dir: &Path) -> Result<SpecSet> {
        let mut files = Vec::new();
        collect_fragment_files(dir, &mut files)?;
        files.sort();

        let mut set = SpecSet::new();
        for path in files {
            match Self::load_fragment(&path) {
                Ok(fragment) => {
                    tracing::debug!("Loaded {} specs from {}", fragment.len(), path.display());
                    set.merge_fragment(&path, fragment, self.policy)?;
                }
                Err(e) => {
                    tracing::warn!("Skipping fragment: {}", e);
                    set.rejected.push(e);
                }
            }
        }

        tracing::info!(
            "Loaded {} specs from {} ({} fragments rejected)",
            set.len(),
            dir.display(),
            set.rejected.len()
        );
        Ok(set)
    }
}

fn collect_fragment_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry_path = entry?.path();

        if entry_path.is_dir() {
            collect_fragment_files(&entry_path, files)?;
        } else if entry_path
            .extension()
            .map_or(false, |ext| ext == "json" || ext == "toml")
        {
            files.push(entry_path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const HELMET_JSON: &str = r#"{
        "helmet_black": {
            "ItemToClone": "helmet",
            "LocalePush": { "en": { "name": "Black Helmet" } },
            "CloneToFilters": true
        }
    }"#;

    const VEST_TOML: &str = r#"
[vest_green]
ItemToClone = "vest"
PushMastery = true

[vest_green.LocalePush.en]
name = "Green Vest"
shortName = "GV"
"#;

    #[test]
    fn test_load_mixed_directory() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a_helmets.json"), HELMET_JSON).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/vests.toml"), VEST_TOML).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let set = SpecLoader::default().load_directory(dir.path()).unwrap();

        assert_eq!(set.len(), 2);
        assert!(set.rejected.is_empty());
        assert!(set.get("helmet_black").unwrap().clone_to_filters);
        let vest = set.get("vest_green").unwrap();
        assert!(vest.push_mastery);
        assert_eq!(vest.locale_push["en"].short_name, "GV");
    }

    #[test]
    fn test_malformed_fragment_is_skipped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("good.json"), HELMET_JSON).unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

        let set = SpecLoader::default().load_directory(dir.path()).unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.rejected.len(), 1);
        assert!(matches!(
            &set.rejected[0],
            GenerationError::MalformedSpec { path, .. } if path.ends_with("broken.json")
        ));
    }

    #[test]
    fn test_duplicate_rejected_by_default() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.json"), HELMET_JSON).unwrap();
        fs::write(dir.path().join("b.json"), HELMET_JSON).unwrap();

        let result = SpecLoader::default().load_directory(dir.path());
        assert!(matches!(
            result,
            Err(GenerationError::DuplicateEntityId { ref id, .. }) if id == "helmet_black"
        ));
    }

    #[test]
    fn test_duplicate_last_write_wins() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a.json"), HELMET_JSON).unwrap();
        fs::write(
            dir.path().join("b.json"),
            HELMET_JSON.replace("Black Helmet", "Blacker Helmet"),
        )
        .unwrap();

        let set = SpecLoader::new(DuplicatePolicy::LastWriteWins)
            .load_directory(dir.path())
            .unwrap();

        assert_eq!(set.len(), 1);
        assert_eq!(set.get("helmet_black").unwrap().locale_push["en"].name, "Blacker Helmet");
        assert!(set.sources["helmet_black"].ends_with("b.json"));
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let result = SpecLoader::default().load_directory(Path::new("/definitely/not/here"));
        assert!(matches!(result, Err(GenerationError::IoError(_))));
    }
}
