use std::sync::{Arc, RwLock};

/// Process-wide list of folder names. Last write wins.
#[derive(Debug, Clone, Default)]
pub struct FolderStore {
    inner: Arc<RwLock<Vec<String>>>,
}

impl FolderStore {
    pub fn new(folders: Vec<String>) -> Self {
        let store = Self::default();
        store.set(folders);
        store
    }

    pub fn set(&self, folders: Vec<String>) {
        let mut cleaned: Vec<String> = Vec::with_capacity(folders.len());
        for f in folders {
            let f = f.trim().to_string();
            if !f.is_empty() && !cleaned.contains(&f) {
                cleaned.push(f);
            }
        }
        match self.inner.write() {
            Ok(mut guard) => *guard = cleaned,
            Err(poisoned) => *poisoned.into_inner() = cleaned,
        }
    }

    pub fn list(&self) -> Vec<String> {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Returns false if the name was blank or already present.
    pub fn add(&self, name: &str) -> bool {
        let name = name.trim();
        let mut folders = self.list();
        if name.is_empty() || folders.iter().any(|f| f == name) {
            return false;
        }
        folders.push(name.to_string());
        self.set(folders);
        true
    }

    pub fn remove(&self, name: &str) -> bool {
        let mut folders = self.list();
        let before = folders.len();
        folders.retain(|f| f != name);
        let removed = folders.len() != before;
        if removed {
            self.set(folders);
        }
        removed
    }
}
