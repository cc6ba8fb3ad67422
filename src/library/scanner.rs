use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// List the video files directly inside `dir`.
///
/// Files are grouped by extension in the order of `extensions`, names sorted
/// within each group. Matching is case-sensitive and does not recurse. Hidden
/// files and anything that is not a regular file are skipped.
pub fn scan_dir(dir: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let read_dir = match fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(e) => {
            warn!("Cannot read directory {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut candidates = Vec::new();
    for entry in read_dir {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };

        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false)
            || entry.path().is_file();
        if !is_file || is_hidden(&entry.path()) {
            continue;
        }
        candidates.push(entry.path());
    }

    let mut videos = Vec::new();
    for ext in extensions {
        let mut group: Vec<PathBuf> = candidates
            .iter()
            .filter(|path| has_extension(path, ext))
            .cloned()
            .collect();
        group.sort();
        videos.extend(group);
    }

    debug!("Found {} video files in {}", videos.len(), dir.display());
    videos
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == ext)
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MenuConfig;
    use std::fs::File;

    fn touch(dir: &Path, name: &str) {
        File::create(dir.join(name)).unwrap();
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn finds_every_supported_extension_once() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.mp4", "b.mpg", "c.mlv", "d.avi", "e.st"] {
            touch(dir.path(), name);
        }

        let found = scan_dir(dir.path(), &MenuConfig::default().extensions);

        assert_eq!(names(&found), ["a.mp4", "b.mpg", "c.mlv", "d.avi", "e.st"]);
    }

    #[test]
    fn ignores_unsupported_and_uppercase_extensions() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["clip.mkv", "notes.txt", "LOUD.MP4", "mp4", "keep.mp4"] {
            touch(dir.path(), name);
        }

        let found = scan_dir(dir.path(), &MenuConfig::default().extensions);

        assert_eq!(names(&found), ["keep.mp4"]);
    }

    #[test]
    fn groups_by_extension_order() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["z.avi", "b.mp4", "a.avi", "a.mp4"] {
            touch(dir.path(), name);
        }

        let found = scan_dir(dir.path(), &MenuConfig::default().extensions);

        assert_eq!(names(&found), ["a.mp4", "b.mp4", "a.avi", "z.avi"]);
    }

    #[test]
    fn skips_directories_hidden_files_and_subdirectory_contents() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("folder.mp4")).unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        touch(&dir.path().join("nested"), "inner.mp4");
        touch(dir.path(), ".hidden.mp4");
        touch(dir.path(), "visible.mp4");

        let found = scan_dir(dir.path(), &MenuConfig::default().extensions);

        assert_eq!(names(&found), ["visible.mp4"]);
    }

    #[test]
    fn missing_directory_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("does-not-exist");

        assert!(scan_dir(&gone, &MenuConfig::default().extensions).is_empty());
    }
}
