//! Applies generated content to target files, or reports drift in check mode.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

pub struct Synchronizer {
    check: bool,
    changed: Vec<PathBuf>,
}

impl Synchronizer {
    pub fn new(check: bool) -> Self {
        Self {
            check,
            changed: Vec::new(),
        }
    }

    /// Compares `new_content` to the file on disk. Identical content is a
    /// no-op; otherwise normal mode writes and check mode records the path.
    pub fn apply(&mut self, path: &Path, new_content: &str) -> Result<()> {
        let current =
            std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        if current == new_content {
            tracing::debug!(path = %path.display(), "already in sync");
            return Ok(());
        }
        if self.check {
            self.changed.push(path.to_path_buf());
            return Ok(());
        }
        std::fs::write(path, new_content)
            .with_context(|| format!("write {}", path.display()))?;
        tracing::info!(path = %path.display(), "updated");
        Ok(())
    }

    /// In check mode, fails when any file drifted; the error lists every
    /// drifted path relative to `root`, one per line.
    pub fn finish(self, root: &Path) -> Result<()> {
        if !self.check || self.changed.is_empty() {
            return Ok(());
        }
        let listing = self
            .changed
            .iter()
            .map(|path| display_path(path, root))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("versions out of sync in:\n{listing}");
    }
}

fn display_path(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) => relative.display().to_string(),
        Err(_) => path.display().to_string(),
    }
}
