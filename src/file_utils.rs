use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @generates: Dictionary path for a locale
    // @params: dir, locale
    pub fn dictionary_path<P: AsRef<Path>>(dir: P, locale: &str) -> PathBuf {
        dir.as_ref().join(format!("{}.json", locale))
    }

    /// Read a file's bytes, `None` when it does not exist
    pub fn read_optional<P: AsRef<Path>>(path: P) -> std::io::Result<Option<Vec<u8>>> {
        match fs::read(path.as_ref()) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Write a string through a sibling temp file and rename it into place
    pub fn write_atomically<P: AsRef<Path>>(path: P, content: &str) -> std::io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut temp_name = path.file_name().unwrap_or_default().to_os_string();
        temp_name.push(".tmp");
        let temp_path = path.with_file_name(temp_name);

        fs::write(&temp_path, content)?;
        if let Err(e) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }
        Ok(())
    }
}
