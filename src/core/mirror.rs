//! Durable mirror of the recipe collection: one named slot holding the
//! JSON-serialized array of every recipe. Mutations rewrite the whole
//! slot; it is read once at startup and only written afterwards.

use crate::core::error::CarnetError;
use crate::core::model::Recipe;
use std::cell::{Cell, RefCell};
use std::fs;
use std::path::{Path, PathBuf};

pub trait Mirror {
    /// Read the whole collection. `Ok(None)` means the slot does not exist yet.
    fn load(&self) -> Result<Option<Vec<Recipe>>, CarnetError>;
    /// Rewrite the whole collection.
    fn save(&self, recipes: &[Recipe]) -> Result<(), CarnetError>;
}

/// JSON file slot. Writes land in a temp file next to the slot and are
/// renamed into place so a crash mid-write never truncates the catalog.
#[derive(Debug, Clone)]
pub struct JsonFileMirror {
    path: PathBuf,
}

impl JsonFileMirror {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "recipes.json".to_string());
        self.path.with_file_name(format!(".{}.tmp", name))
    }
}

impl Mirror for JsonFileMirror {
    fn load(&self) -> Result<Option<Vec<Recipe>>, CarnetError> {
        if !self.path.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        let recipes: Vec<Recipe> = serde_json::from_str(&content)?;
        Ok(Some(recipes))
    }

    fn save(&self, recipes: &[Recipe]) -> Result<(), CarnetError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| CarnetError::Mirror(format!("{}: {}", parent.display(), e)))?;
            }
        }
        let json = serde_json::to_string_pretty(recipes)
            .map_err(|e| CarnetError::Mirror(e.to_string()))?;
        let tmp = self.tmp_path();
        fs::write(&tmp, json).map_err(|e| CarnetError::Mirror(format!("{}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| CarnetError::Mirror(format!("{}: {}", self.path.display(), e)))?;
        Ok(())
    }
}

/// In-memory slot for tests. `fail_saves` simulates a full or read-only
/// backing store without touching the filesystem.
#[derive(Debug, Default)]
pub struct MemoryMirror {
    slot: RefCell<Option<Vec<Recipe>>>,
    fail_saves: Cell<bool>,
}

impl MemoryMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recipes(recipes: Vec<Recipe>) -> Self {
        Self {
            slot: RefCell::new(Some(recipes)),
            fail_saves: Cell::new(false),
        }
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    /// Current slot contents, as a later load would see them.
    pub fn snapshot(&self) -> Option<Vec<Recipe>> {
        self.slot.borrow().clone()
    }
}

impl Mirror for MemoryMirror {
    fn load(&self) -> Result<Option<Vec<Recipe>>, CarnetError> {
        Ok(self.slot.borrow().clone())
    }

    fn save(&self, recipes: &[Recipe]) -> Result<(), CarnetError> {
        if self.fail_saves.get() {
            return Err(CarnetError::Mirror("simulated save failure".to_string()));
        }
        *self.slot.borrow_mut() = Some(recipes.to_vec());
        Ok(())
    }
}
