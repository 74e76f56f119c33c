//! Live filesystem adapter using `std::fs`.

use std::path::Path;

use crate::ports::{FileSystem, PortError};

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>, PortError> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                entries.push(name.to_string());
            }
        }
        entries.sort();
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_sorted_entries() {
        let dir = std::env::temp_dir().join("neuronbridge_live_fs_test");
        std::fs::create_dir_all(dir.join("v3.0.0")).unwrap();
        std::fs::create_dir_all(dir.join("v2.4.1")).unwrap();

        let fs = LiveFileSystem;
        assert!(fs.is_dir(&dir));
        let entries = fs.list_dir(&dir).unwrap();
        assert_eq!(entries, vec!["v2.4.1", "v3.0.0"]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let fs = LiveFileSystem;
        let missing = Path::new("/nonexistent/neuronbridge/releases");
        assert!(!fs.is_dir(missing));
        assert!(fs.list_dir(missing).is_err());
    }
}
