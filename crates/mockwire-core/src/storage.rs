//! Durable plan documents.
//!
//! Each plan is stored as one pretty-printed JSON document at
//! `<root>/<project>/<plan>.json`. Documents are always rewritten in full.
//! Paths are always derived from the validated plan key, never from the
//! document contents.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, warn};

use crate::{
    error::{MockError, Result},
    models::Plan,
};

/// Reads and writes plan documents under a root directory.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    /// Opens the store, creating the root directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `MockError::FileSystem` if the directory cannot be created.
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| MockError::FileSystem {
            path: root.clone(),
            source: e,
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn document_path(&self, plan: &Plan) -> PathBuf {
        self.root
            .join(&plan.project)
            .join(format!("{}.json", plan.name))
    }

    /// Writes the plan's document.
    ///
    /// # Errors
    ///
    /// Returns `MockError::InvalidInput` for a key that is not a valid
    /// storage identifier, otherwise `MockError::Serialization` or
    /// `MockError::FileSystem`.
    pub fn save(&self, plan: &Plan) -> Result<()> {
        plan.key().validate()?;
        let path = self.document_path(plan);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| MockError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(plan)?;
        fs::write(&path, json).map_err(|e| MockError::FileSystem { path: path.clone(), source: e })?;
        debug!("Saved plan {} to {}", plan.key(), path.display());
        Ok(())
    }

    /// Removes the plan's document, and its project directory once empty.
    /// A missing document is not an error.
    ///
    /// # Errors
    ///
    /// Returns `MockError::FileSystem` for any other I/O failure.
    pub fn delete(&self, plan: &Plan) -> Result<()> {
        plan.key().validate()?;
        let path = self.document_path(plan);
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(MockError::FileSystem { path, source: e }),
        }
        if let Some(project_dir) = path.parent() {
            // Fails while other plans of the project remain
            let _ = fs::remove_dir(project_dir);
        }
        Ok(())
    }

    /// Parses every `*.json` document in the project directories under the
    /// root.
    ///
    /// Documents that cannot be read or parsed, or whose key is not a valid
    /// storage identifier, are skipped with a warning. The `document` field
    /// of each loaded plan is recomputed from its key.
    ///
    /// # Errors
    ///
    /// Returns `MockError::FileSystem` if the root directory cannot be read.
    pub fn load_all(&self) -> Result<Vec<Plan>> {
        let projects = fs::read_dir(&self.root).map_err(|e| MockError::FileSystem {
            path: self.root.clone(),
            source: e,
        })?;

        let mut plans = Vec::new();
        for project in projects.flatten() {
            let project_dir = project.path();
            if !project_dir.is_dir() {
                continue;
            }
            let entries = match fs::read_dir(&project_dir) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Skipping project directory {}: {e}", project_dir.display());
                    continue;
                }
            };
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                    continue;
                }
                match Self::read_document(&path) {
                    Ok(plan) => plans.push(plan),
                    Err(e) => warn!("Skipping plan document {}: {e}", path.display()),
                }
            }
        }
        Ok(plans)
    }

    fn read_document(path: &Path) -> Result<Plan> {
        let content = fs::read_to_string(path).map_err(|e| MockError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut plan: Plan = serde_json::from_str(&content)?;
        let key = plan.key();
        key.validate()?;
        plan.document = Plan::document_name(&key);
        Ok(plan)
    }
}
