//! Persistence of the memory register.
//!
//! The register is stored as a single [`MemoryRecord`] in `memory.json`.
//! An empty register has no file.

use std::path::Path;

use anyhow::{Context, Result};

use rc_core::MemoryRecord;

/// Loads the stored register.
///
/// Returns `None` if the file doesn't exist.
/// Returns an error if the file exists but is unreadable/unparseable.
pub fn load(path: &Path) -> Result<Option<MemoryRecord>> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let record: MemoryRecord =
                serde_json::from_str(&content).context("failed to parse memory.json")?;
            Ok(Some(record))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).context("failed to read memory.json"),
    }
}

/// Writes the register, or removes the file when the register is empty.
pub fn save(path: &Path, record: Option<&MemoryRecord>) -> Result<()> {
    let Some(record) = record else {
        return clear(path);
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("failed to create data directory")?;
    }
    let json = serde_json::to_string_pretty(record).context("failed to serialize memory")?;
    std::fs::write(path, json).context("failed to write memory.json")?;
    Ok(())
}

/// Removes the stored register. Missing files are fine.
pub fn clear(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).context("failed to remove memory.json"),
    }
}
