use crate::core::path::backup_path;
use crate::core::{BumpError, BumpResult};
use crate::package::state::Field;
use std::fs;
use std::path::{Path, PathBuf};

/// Rewrites the version and hash of a package-definition file in place
///
/// `apply_update` leaves a backup next to the file. After a successful
/// apply, exactly one of `restore` (put the old file back) or `cleanup`
/// (keep the new file) must follow.
#[derive(Debug, Clone)]
pub struct PackageFileUpdater {
    path: PathBuf,
    backup: PathBuf,
}

impl PackageFileUpdater {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            backup: backup_path(path),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> &Path {
        &self.backup
    }

    /// Check if a backup is present
    pub fn has_backup(&self) -> bool {
        self.backup.exists()
    }

    /// Back the file up, then substitute the first version and hash values
    ///
    /// Everything outside the two quoted values is preserved byte-for-byte.
    /// When the file cannot be rewritten it is left untouched and the
    /// backup is removed again.
    pub fn apply_update(&self, new_version: &str, new_hash: &str) -> BumpResult<()> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            BumpError::PackageFile(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        fs::copy(&self.path, &self.backup)?;
        tracing::debug!("Backed up {} to {}", self.path.display(), self.backup.display());

        let updated = match substitute(&content, new_version, new_hash) {
            Ok(updated) => updated,
            Err(e) => {
                self.cleanup()?;
                return Err(e);
            }
        };

        if let Err(e) = fs::write(&self.path, updated) {
            self.restore()?;
            return Err(e.into());
        }

        tracing::info!(
            "Updated {}: version={} sha256={}",
            self.path.display(),
            new_version,
            new_hash
        );
        Ok(())
    }

    /// Put the backup back in place; no-op when there is no backup
    pub fn restore(&self) -> BumpResult<()> {
        if !self.has_backup() {
            return Ok(());
        }

        fs::copy(&self.backup, &self.path)?;
        fs::remove_file(&self.backup)?;
        tracing::info!("Restored {} from backup", self.path.display());
        Ok(())
    }

    /// Drop the backup once the update is verified; no-op when absent
    pub fn cleanup(&self) -> BumpResult<()> {
        if self.has_backup() {
            fs::remove_file(&self.backup)?;
            tracing::debug!("Removed backup {}", self.backup.display());
        }
        Ok(())
    }
}

/// Replace the first version and hash values in `content`
fn substitute(content: &str, new_version: &str, new_hash: &str) -> BumpResult<String> {
    let mut edits = Vec::with_capacity(2);

    for (field, value) in [(Field::Version, new_version), (Field::Hash, new_hash)] {
        if !field.accepts(value)? {
            return Err(BumpError::PackageFile(format!(
                "refusing to write unexpected {} value: {:?}",
                field.name(),
                value
            )));
        }

        let range = field.value_range(content)?.ok_or_else(|| {
            BumpError::PackageFile(format!("no `{} = \"...\"` field found", field.name()))
        })?;
        edits.push((range, value));
    }

    // Apply from the back so earlier ranges stay valid
    edits.sort_by_key(|(range, _)| std::cmp::Reverse(range.start));

    let mut updated = content.to_string();
    for (range, value) in edits {
        updated.replace_range(range, value);
    }

    Ok(updated)
}
