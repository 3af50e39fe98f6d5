use anyhow::{Result, Context};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::Builder;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        if !path.is_dir() {
            return Err(anyhow::anyhow!("Not a directory: {:?}", path));
        }
        Ok(())
    }

    /// Write bytes so that `path` either keeps its old state or holds the full content
    ///
    /// The data goes to a temporary file in the same directory, which is then
    /// renamed over `path`. A crash mid-write leaves only the temporary file,
    /// which is removed on drop or never matches a cache lookup.
    pub fn write_atomic<P: AsRef<Path>>(path: P, content: &[u8]) -> io::Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = Builder::new().prefix(".partial-").tempfile_in(dir)?;
        temp.write_all(content)?;
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

