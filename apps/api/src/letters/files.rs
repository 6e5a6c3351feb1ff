use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::warn;

/// Replaces every non-alphanumeric character with `_`.
pub fn safe_filename(component: &str) -> String {
    component
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Writes `contents` to `path` and syncs it to disk.
pub fn write_file(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(contents)?;
    file.sync_all()
}

/// Keeps only files that exist and are non-empty. A missing or zero-byte file
/// is a failed generation and must never be handed to a consumer.
pub fn retain_deliverable(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths
        .into_iter()
        .filter(|path| match fs::metadata(path) {
            Ok(meta) if meta.is_file() && meta.len() > 0 => true,
            Ok(_) => {
                warn!("Generated file is empty, dropping: {}", path.display());
                false
            }
            Err(e) => {
                warn!("Generated file missing, dropping: {} ({e})", path.display());
                false
            }
        })
        .collect()
}
